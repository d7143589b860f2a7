pub mod adapter;
pub mod error;
pub mod naming;
pub mod pass;
pub mod plugin;
pub mod tree;
pub mod utils;
pub mod view;

pub use adapter::{
    AdapterContext, ExtractedConstruct, LanguageAdapter, MatchDisposition, ReferenceKind,
    ReferenceSite,
};
pub use error::{PluginError, PluginResult};
pub use naming::{DotPathConvention, NamingConvention, ParentScope, UNNAMED_NODE};
pub use pass::{CaptureRole, ExtractionPass};
pub use plugin::{LanguagePlugin, PluginInfo, QueryResource};
pub use tree::{Capture, ConcreteNode, ConcreteTree, NodeOf, QueryMatch, SyntaxEngine};
pub use view::{BoundNode, NodeView};
