pub mod entities;
pub mod suggestion_search;

pub use entities::SearchEvent;
pub use suggestion_search::SuggestionSearch;
