pub mod config_gen;
pub mod convert;

pub use config_gen::config_generate;
pub use convert::convert_link;
