//! Atom page parsing.
//!
//! Only the parts of an Atom document that matter for a sitemap are read:
//!
//! ```xml
//! <feed xmlns="http://www.w3.org/2005/Atom">
//!   <entry>
//!     <published>2023-04-30T09:00:00.000-07:00</published>
//!     <updated>2023-05-01T12:00:00.000-07:00</updated>
//!     <link rel="alternate" type="text/html" href="https://blog.example/2023/05/post.html"/>
//!   </entry>
//! </feed>
//! ```
//!
//! Elements are matched by namespace, so prefixed Atom documents work and
//! extension elements (`openSearch:*`, `thr:*`, `media:*`) are ignored.

use super::{Entry, FeedError};
use crate::{debug, utils::date::normalize_lastmod};
use quick_xml::{
    NsReader,
    events::{BytesStart, Event},
    name::{Namespace, ResolveResult},
};

const ATOM_NS: &[u8] = b"http://www.w3.org/2005/Atom";

/// Depth of `<entry>` below the document root.
const ENTRY_DEPTH: usize = 2;

/// One parsed feed page.
#[derive(Debug, Default)]
pub struct FeedPage {
    /// Number of `<entry>` records, including skipped ones.
    pub record_count: usize,
    /// Entries with an HTML permalink, in document order.
    pub entries: Vec<Entry>,
    /// Records dropped for lack of an HTML permalink.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy)]
enum Stamp {
    Updated,
    Published,
}

/// Raw fields collected while inside one `<entry>`.
#[derive(Debug, Default)]
struct RawEntry {
    /// Set once by the first qualifying link; the href may still be absent.
    alternate: Option<Option<String>>,
    updated: Option<String>,
    published: Option<String>,
}

impl RawEntry {
    fn set_stamp(&mut self, which: Stamp, text: String) {
        let slot = match which {
            Stamp::Updated => &mut self.updated,
            Stamp::Published => &mut self.published,
        };
        // First element wins
        if slot.is_none() {
            *slot = Some(text);
        }
    }

    fn into_entry(self) -> Option<Entry> {
        let location = self.alternate.flatten().filter(|href| !href.is_empty())?;
        let stamp = [self.updated, self.published]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or_default();

        Some(Entry {
            location,
            last_modified: normalize_lastmod(&stamp),
        })
    }
}

/// Parse one Atom page.
pub fn parse_page(xml: &str) -> Result<FeedPage, FeedError> {
    let mut reader = NsReader::from_str(xml);
    let mut page = FeedPage::default();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut current: Option<RawEntry> = None;
    let mut capture: Option<(Stamp, String)> = None;

    loop {
        let (ns, event) = reader.read_resolved_event().map_err(malformed)?;
        let in_atom = ns == ResolveResult::Bound(Namespace(ATOM_NS));

        match event {
            Event::Start(e) => {
                depth += 1;
                saw_root = true;
                if let Some(stamp) = open_element(&e, in_atom, depth, &mut page, &mut current)? {
                    capture = Some((stamp, String::new()));
                }
            }
            Event::Empty(e) => {
                saw_root = true;
                // Self-closing: open and close at the child depth
                if let Some(stamp) = open_element(&e, in_atom, depth + 1, &mut page, &mut current)?
                    && let Some(raw) = current.as_mut()
                {
                    raw.set_stamp(stamp, String::new());
                }
                if depth + 1 == ENTRY_DEPTH {
                    close_entry(&mut page, &mut current);
                }
            }
            Event::Text(t) => {
                if let Some((_, buf)) = capture.as_mut() {
                    let text = reader.decoder().decode(&t).map_err(malformed)?;
                    let text = quick_xml::escape::unescape(&text).map_err(malformed)?;
                    buf.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some((_, buf)) = capture.as_mut() {
                    buf.push_str(&reader.decoder().decode(&c).map_err(malformed)?);
                }
            }
            Event::End(_) => {
                if depth == ENTRY_DEPTH + 1
                    && let Some((stamp, text)) = capture.take()
                    && let Some(raw) = current.as_mut()
                {
                    raw.set_stamp(stamp, text);
                } else if depth == ENTRY_DEPTH {
                    close_entry(&mut page, &mut current);
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(FeedError::Malformed("document has no root element".into()));
    }
    if depth != 0 {
        return Err(FeedError::Malformed("unexpected end of document".into()));
    }

    Ok(page)
}

/// Handle an opening tag at `depth`. Returns the timestamp kind to capture,
/// if this is an `<updated>`/`<published>` child of an entry.
fn open_element(
    e: &BytesStart<'_>,
    in_atom: bool,
    depth: usize,
    page: &mut FeedPage,
    current: &mut Option<RawEntry>,
) -> Result<Option<Stamp>, FeedError> {
    if !in_atom {
        return Ok(None);
    }
    let local = e.local_name();

    if depth == ENTRY_DEPTH && local.as_ref() == b"entry" {
        page.record_count += 1;
        *current = Some(RawEntry::default());
        return Ok(None);
    }

    let Some(raw) = current.as_mut() else {
        return Ok(None);
    };
    if depth != ENTRY_DEPTH + 1 {
        return Ok(None);
    }

    match local.as_ref() {
        b"link" => {
            if raw.alternate.is_none() && is_html_alternate(e)? {
                raw.alternate = Some(attribute(e, "href")?);
            }
            Ok(None)
        }
        b"updated" => Ok(Some(Stamp::Updated)),
        b"published" => Ok(Some(Stamp::Published)),
        _ => Ok(None),
    }
}

fn close_entry(page: &mut FeedPage, current: &mut Option<RawEntry>) {
    let Some(raw) = current.take() else {
        return;
    };
    match raw.into_entry() {
        Some(entry) => page.entries.push(entry),
        None => {
            page.skipped += 1;
            debug!("feed"; "skipping record without an HTML permalink");
        }
    }
}

/// `rel="alternate"` with a `type` starting with `text/html`.
fn is_html_alternate(e: &BytesStart<'_>) -> Result<bool, FeedError> {
    let rel = attribute(e, "rel")?;
    let mime = attribute(e, "type")?.unwrap_or_default();
    Ok(rel.as_deref() == Some("alternate") && mime.starts_with("text/html"))
}

fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, FeedError> {
    let Some(attr) = e.try_get_attribute(name).map_err(malformed)? else {
        return Ok(None);
    };
    let value = attr.unescape_value().map_err(malformed)?;
    Ok(Some(value.into_owned()))
}

fn malformed(err: impl std::fmt::Display) -> FeedError {
    FeedError::Malformed(err.to_string())
}
