//! 服务模块

pub mod gallery;

pub use gallery::{GalleryService, GalleryServiceImpl, LIST_LIMIT, create_gallery_service};
