//! How search results are turned into something a person can read.
//!
//! Nothing in here touches the network or a UI toolkit. The GUI draws what
//! these types describe.

pub mod answer;
pub mod card;
pub mod doc_type;
pub mod expand;
pub mod highlight;
pub mod text;
pub mod view;

pub use answer::AnswerLine;
pub use card::{DetailGroup, DetailItem, ResultCard};
pub use doc_type::DocKind;
pub use expand::ExpandState;
pub use highlight::Segment;
pub use view::{ResultsHeader, ResultsView};
