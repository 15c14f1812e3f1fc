pub mod clip_mask;
pub mod compositor;
pub mod edge;
pub mod framebuffer;
pub mod pixel_set;
