pub mod attribute;
pub mod attribute_format;
pub mod attribute_id;
pub mod definition;

pub use attribute::{Attribute, AttributeHeader};
pub use attribute_format::AttributeFormat;
pub use attribute_id::{AttributeId, AttributeNamespace};
pub use definition::{attribute_name, lookup_definition, AttributeDefinition};
