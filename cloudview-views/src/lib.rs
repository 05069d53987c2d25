//! Fieldset detail views and list filters for cloud resource records
//!
//! A resource's [`ViewDef`] says two things about how its records are shown:
//!
//! - **Detail page**: an ordered list of [`FieldsetDef`]s. The
//!   [`ViewComposer`] renders one collapsible container per fieldset and drops
//!   every field no fieldset claims.
//! - **List page**: the `selectable` columns whose filter widget is a select
//!   of stored values instead of a free-text box ([`mark_selectable`]).
//!
//! Rendering produces a [`RenderTree`]: keys starting with `#` are
//! properties, every other key is a child element.

pub mod cache;
pub mod composer;
pub mod context;
pub mod error;
pub mod fieldset;
pub mod list;
pub mod render;
pub mod renderer;
pub mod resolve;
pub mod transform;

pub use cache::{CacheKey, RenderCache};
pub use composer::ViewComposer;
pub use context::{ViewDefaults, ViewsContext, ViewsContextBuilder};
pub use error::{Result, ViewsError};
pub use fieldset::{FieldsetDef, PolicyProblem, ViewDef};
pub use list::{
    mark_selectable, FilterDefinition, FilterTable, FilterWidget, ListQuery, ListView,
    SortDirection,
};
pub use render::{is_meta_key, RenderNode, RenderTree, META_PREFIX};
pub use renderer::{EntityRenderer, FieldListRenderer, RenderContext};
pub use resolve::{ResolveError, ValueResolver};
pub use transform::{RenderTransform, TransformPipeline};
