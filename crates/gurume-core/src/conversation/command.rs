//! Reserved text commands (sent by the rich-menu buttons).

/// Menu text that starts a location search.
pub const LOCATION_SEARCH: &str = "位置情報検索";

/// Menu text that shows the favorites list.
pub const VIEW_FAVORITES: &str = "お気に入りを見る";

/// How a free-text message is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCommand<'a> {
    LocationSearch,
    ViewFavorites,
    /// Anything else is a keyword for the pending query.
    Keyword(&'a str),
}

impl<'a> TextCommand<'a> {
    /// Commands match exactly; keywords are kept verbatim.
    pub fn parse(text: &'a str) -> Self {
        match text {
            LOCATION_SEARCH => TextCommand::LocationSearch,
            VIEW_FAVORITES => TextCommand::ViewFavorites,
            other => TextCommand::Keyword(other),
        }
    }
}
