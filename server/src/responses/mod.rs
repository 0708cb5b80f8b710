//! Response types

mod attachment;

pub use attachment::Attachment;
