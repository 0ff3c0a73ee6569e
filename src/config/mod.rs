//! Binding of typed configuration shapes to external key-value sources.

mod binder;
mod env;
mod error;
mod schema;
mod source;
mod table;

pub use binder::{bind, bind_env, Bindable, Binder, EmptyValues};
pub use env::EnvSource;
pub use error::{BindError, BoxError, DescriptorIssue};
pub use schema::{FieldDescriptor, FieldInfo, Manifest, Schema, SchemaBuilder};
pub use source::{from_fn, FnSource, ValueSource};
pub use table::TableSource;
