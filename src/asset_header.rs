pub const HEADER_SIZE: usize = 4;

/// The 4-byte prefix of a sprite asset. The header converters skip it and
/// take dimensions from their arguments instead.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct AssetHeader {
	pub width: u16,
	pub height: u16,
}


pub fn get_header(data: &[u8]) -> Option<AssetHeader> {
	if data.len() < HEADER_SIZE {
		return None;
	}

	return Some(AssetHeader {
		width: u16::from_le_bytes([
			data[0x00], data[0x01]
		]),

		height: u16::from_le_bytes([
			data[0x02], data[0x03]
		]),
	});
}


pub fn get_bytes(header: AssetHeader) -> [u8; HEADER_SIZE] {
	let width: [u8; 2] = header.width.to_le_bytes();
	let height: [u8; 2] = header.height.to_le_bytes();

	return [width[0], width[1], height[0], height[1]];
}


/// Everything after the header; empty for assets shorter than the header.
pub fn pixel_bytes(data: &[u8]) -> &[u8] {
	data.get(HEADER_SIZE..).unwrap_or(&[])
}
