pub mod attribute_list;
pub mod read_attribute;
pub mod write_attribute;
