//! Configuration section definitions.
//!
//! Each module corresponds to a section in `blogmap.toml`:
//!
//! | Module    | TOML Section  | Purpose                                  |
//! |-----------|---------------|------------------------------------------|
//! | `feed`    | `[feed]`      | Feed address, paging, HTTP client        |
//! | `sitemap` | `[sitemap]`   | Output directory, index base URL, limits |

mod feed;
mod sitemap;

pub use feed::FeedConfig;
pub use sitemap::SitemapConfig;
