// Profile signal recovery: fetch a profile page, run the extraction
// heuristics over it, and fall back to the URL slug when either step fails.

pub mod extractor;
pub mod fetcher;
pub mod slug;
