// Pure helpers shared by the auth, profile, and posts domains.

pub mod email;
pub mod images;
pub mod phone;

pub use email::is_valid_email;
pub use images::image_extension;
pub use phone::{mask_phone, unmask_digits};
