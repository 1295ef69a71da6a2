//! Component System for reinhardt-vdom
//!
//! Components are render functions from [`Props`] to a [`VNode`] tree. Each
//! mounted occurrence gets its own instance holding hook state; instances are
//! created, updated and destroyed by the reconciler as their position in the
//! parent's tree comes and goes.
//!
//! ## Features
//!
//! - **VNode descriptors**: elements, text and child components with keys
//! - **Props**: the attributes and children a component was invoked with
//! - **Function components**: any `Fn(&Props) -> VNode`, or a [`Component`] struct
//! - **Mountable**: explicit mount/unmount of root components
//!
//! ## Usage
//!
//! ```ignore
//! use reinhardt_vdom::component::{ComponentFn, FunctionComponent, Mountable, Props, VNode};
//! use reinhardt_vdom::h;
//!
//! fn greeting(props: &Props) -> VNode {
//!     let name = props.get_str("name").unwrap_or("world");
//!     h("p", (), format!("Hello, {}!", name))
//! }
//!
//! let app = FunctionComponent::new(|_props| {
//!     h("div", (), h(ComponentFn::new(greeting), Attributes::new().attr("name", "Ada"), ()))
//! });
//! app.mount(&container)?;
//! ```

mod attributes;
mod children;
mod function;
mod instance;
mod mount;
mod node;
mod props;
mod r#trait;

pub use attributes::{AttrValue, Attributes, Key};
pub use children::IntoChildren;
pub use function::{ComponentFn, IntoRender};
pub(crate) use instance::InstanceCore;
pub use instance::LifecycleState;
pub use mount::{FunctionComponent, Mountable, render};
pub use node::{VNode, VNodeKind};
pub use props::Props;
pub use r#trait::Component;
