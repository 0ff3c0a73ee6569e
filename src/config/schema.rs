//! Field descriptors and the per-shape schema built from them.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::error::{BindError, DescriptorIssue};

/// Writes a bound value into one field of a shape.
pub(crate) enum Setter<T> {
    Required(fn(&mut T, String)),
    Optional(fn(&mut T, Option<String>)),
}

// Derives would demand `T: Copy`.
impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Setter<T> {}

/// Metadata tying one field of `T` to an external key.
pub struct FieldDescriptor<T> {
    field: &'static str,
    key: String,
    setter: Setter<T>,
}

impl<T> FieldDescriptor<T> {
    /// Name of the field on the shape.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Key looked up in the value source.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_required(&self) -> bool {
        matches!(self.setter, Setter::Required(_))
    }

    pub(crate) fn setter(&self) -> Setter<T> {
        self.setter
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            key: self.key.clone(),
            setter: self.setter,
        }
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("field", &self.field)
            .field("key", &self.key)
            .field("required", &self.is_required())
            .finish()
    }
}

/// The validated, ordered list of descriptors for a shape.
///
/// Descriptors are visited in registration order, which makes the key reported
/// by a failed binding deterministic.
///
/// ## Example
///
/// ```
/// use env_binder::{BindError, Schema};
///
/// #[derive(Default)]
/// struct Database {
///     host: String,
///     port: Option<String>,
/// }
///
/// let schema = Schema::<Database>::builder()
///     .required("host", "DB_HOST", |db, v| db.host = v)
///     .optional("port", "DB_PORT", |db, v| db.port = v)
///     .build()?;
///
/// assert_eq!(schema.len(), 2);
/// # Ok::<(), BindError>(())
/// ```
pub struct Schema<T> {
    shape: &'static str,
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> Schema<T> {
    /// Starts registering fields for `T`.
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder {
            fields: Vec::new(),
        }
    }

    /// Type name of the shape this schema describes.
    pub fn shape(&self) -> &'static str {
        self.shape
    }

    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Lists the settings this shape consumes.
    pub fn manifest(&self) -> Manifest {
        Manifest {
            shape: self.shape.to_string(),
            fields: self
                .fields
                .iter()
                .map(|d| FieldInfo {
                    field: d.field.to_string(),
                    key: d.key.clone(),
                    required: d.is_required(),
                })
                .collect(),
        }
    }
}

impl<T> Clone for Schema<T> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape,
            fields: self.fields.clone(),
        }
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("shape", &self.shape)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Builder registering `(field, key, required)` triples for a shape.
#[must_use = "builders do nothing until .build() is called"]
pub struct SchemaBuilder<T> {
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> SchemaBuilder<T> {
    /// Registers a field that must be present in the source.
    pub fn required(
        mut self,
        field: &'static str,
        key: impl Into<String>,
        setter: fn(&mut T, String),
    ) -> Self {
        self.fields.push(FieldDescriptor {
            field,
            key: key.into(),
            setter: Setter::Required(setter),
        });
        self
    }

    /// Registers a field that binds to `None` when the source has no value.
    pub fn optional(
        mut self,
        field: &'static str,
        key: impl Into<String>,
        setter: fn(&mut T, Option<String>),
    ) -> Self {
        self.fields.push(FieldDescriptor {
            field,
            key: key.into(),
            setter: Setter::Optional(setter),
        });
        self
    }

    /// Validates every descriptor and freezes the schema.
    ///
    /// Fails on an empty external key or on a field registered twice.
    pub fn build(self) -> Result<Schema<T>, BindError> {
        let shape = std::any::type_name::<T>();
        let mut seen = HashSet::new();

        for descriptor in &self.fields {
            let issue = if descriptor.key.trim().is_empty() {
                Some(DescriptorIssue::EmptyKey)
            } else if !seen.insert(descriptor.field) {
                Some(DescriptorIssue::DuplicateField)
            } else {
                None
            };

            if let Some(reason) = issue {
                return Err(BindError::InvalidDescriptor {
                    shape,
                    field: descriptor.field.to_string(),
                    reason,
                });
            }
        }

        Ok(Schema {
            shape,
            fields: self.fields,
        })
    }

    /// Freezes a statically declared schema.
    ///
    /// # Panics
    ///
    /// Panics on the descriptors [`build`](Self::build) rejects. A malformed
    /// declaration is a bug in the shape, not bad input.
    pub fn register(self) -> Schema<T> {
        match self.build() {
            Ok(schema) => schema,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Serializable listing of the settings a shape consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub shape: String,
    pub fields: Vec<FieldInfo>,
}

impl Manifest {
    /// Renders the manifest as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub field: String,
    pub key: String,
    pub required: bool,
}
