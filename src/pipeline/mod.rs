pub mod compositor;
pub mod export;
pub mod fs_ops;
pub mod ico;
pub mod packer;
pub mod writer;

pub use compositor::composite;
pub use export::{BatchReport, export_icons, save_images};
pub use ico::IconContainer;
pub use packer::{pack, pack_bytes, pack_from_source};
pub use writer::{encode_png, write_image};
