//! Avatar decoding and placeholder helpers.

use std::hash::{DefaultHasher, Hash, Hasher};

/// Avatars larger than this on either edge are downscaled before upload.
pub const AVATAR_MAX_EDGE: u32 = 256;

#[derive(Clone)]
pub struct AvatarImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_avatar_image(bytes: &[u8]) -> Result<AvatarImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let dynamic = if dynamic.width() > AVATAR_MAX_EDGE || dynamic.height() > AVATAR_MAX_EDGE {
        dynamic.thumbnail(AVATAR_MAX_EDGE, AVATAR_MAX_EDGE)
    } else {
        dynamic
    };
    let rgba = dynamic.to_rgba8();
    Ok(AvatarImage {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        rgba: rgba.into_raw(),
    })
}

pub fn placeholder_initial(username: &str) -> String {
    username
        .chars()
        .find(|ch| ch.is_alphanumeric())
        .map(|ch| ch.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// Stable-per-run fill color for the placeholder circle.
pub fn placeholder_rgb(username: &str) -> [u8; 3] {
    let mut hasher = DefaultHasher::new();
    username.hash(&mut hasher);
    let hash = hasher.finish();
    // Keep channels in a mid range so white initials stay readable.
    let channel = |shift: u32| 70 + ((hash >> shift) & 0x7f) as u8;
    [channel(0), channel(8), channel(16)]
}
