pub mod config;

pub use config::{
    bind, bind_env, BindError, Bindable, Binder, EmptyValues, EnvSource, Schema, TableSource,
    ValueSource,
};
