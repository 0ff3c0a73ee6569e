use tracing::{debug, warn};

use super::env::EnvSource;
use super::error::{BindError, BoxError};
use super::schema::{Schema, Setter};
use super::source::ValueSource;

/// A shape whose fields can be filled from a [`ValueSource`].
///
/// Implementations declare their fields with
/// [`SchemaBuilder::register`](super::schema::SchemaBuilder::register), which
/// panics on a malformed descriptor before any value is looked up.
pub trait Bindable: Sized {
    fn schema() -> Schema<Self>;
}

/// How an empty string is treated for a required field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyValues {
    /// An empty value fails like an unset one.
    #[default]
    Missing,
    /// An empty value satisfies the requirement.
    Present,
}

/// Binds shapes against a single value source.
///
/// Each call is independent: nothing is cached between bindings and the source
/// is only ever read.
///
/// ## Example
///
/// ```
/// use std::collections::HashMap;
/// use env_binder::{BindError, Bindable, Binder, Schema};
///
/// #[derive(Debug, Default)]
/// struct AppConfig {
///     host: String,
///     port: Option<String>,
/// }
///
/// impl Bindable for AppConfig {
///     fn schema() -> Schema<Self> {
///         Schema::<Self>::builder()
///             .required("host", "APP_HOST", |c, v| c.host = v)
///             .optional("port", "APP_PORT", |c, v| c.port = v)
///             .register()
///     }
/// }
///
/// let source = HashMap::from([("APP_HOST".to_string(), "db.internal".to_string())]);
/// let config: AppConfig = Binder::new(&source).bind()?;
///
/// assert_eq!(config.host, "db.internal");
/// assert_eq!(config.port, None);
/// # Ok::<(), BindError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Binder<S> {
    source: S,
    empty_values: EmptyValues,
}

impl<S: ValueSource> Binder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            empty_values: EmptyValues::default(),
        }
    }

    /// Sets how empty strings count for required fields.
    #[must_use]
    pub fn empty_values(mut self, policy: EmptyValues) -> Self {
        self.empty_values = policy;
        self
    }

    /// Builds a default `T` and fills every described field.
    pub fn bind<T: Bindable + Default>(&self) -> Result<T, BindError> {
        let schema = T::schema();
        self.populate(&schema, T::default())
    }

    /// Like [`bind`](Self::bind), but the blank instance comes from `factory`.
    ///
    /// The factory only sees the source. Its error is reported as
    /// [`BindError::ShapeConstructionFailure`].
    pub fn bind_with<T, F, E>(&self, factory: F) -> Result<T, BindError>
    where
        T: Bindable,
        F: FnOnce(&S) -> Result<T, E>,
        E: Into<BoxError>,
    {
        let schema = T::schema();
        let instance = factory(&self.source).map_err(|e| BindError::ShapeConstructionFailure {
            shape: schema.shape(),
            source: e.into(),
        })?;
        self.populate(&schema, instance)
    }

    /// Fills the fields of `instance` described by `schema`.
    ///
    /// Stops at the first required key without a value.
    pub fn populate<T>(&self, schema: &Schema<T>, mut instance: T) -> Result<T, BindError> {
        for descriptor in schema.fields() {
            let key = descriptor.key();
            let value = self.source.lookup(key);
            debug!(
                shape = schema.shape(),
                field = descriptor.field(),
                key,
                found = value.is_some(),
                "binding field"
            );

            match descriptor.setter() {
                Setter::Required(set) => match value.filter(|v| self.accepts(v)) {
                    Some(value) => set(&mut instance, value),
                    None => {
                        warn!(shape = schema.shape(), key, "required value is empty or not set");
                        return Err(BindError::MissingRequiredValue(key.to_string()));
                    }
                },
                Setter::Optional(set) => set(&mut instance, value),
            }
        }

        Ok(instance)
    }

    fn accepts(&self, value: &str) -> bool {
        self.empty_values == EmptyValues::Present || !value.is_empty()
    }
}

/// Binds `T` against `source` with the default empty-value policy.
pub fn bind<T, S>(source: &S) -> Result<T, BindError>
where
    T: Bindable + Default,
    S: ValueSource + ?Sized,
{
    Binder::new(source).bind()
}

/// Binds `T` against the process environment, keys read verbatim.
pub fn bind_env<T: Bindable + Default>() -> Result<T, BindError> {
    Binder::new(EnvSource::new()).bind()
}
