/// Copies everything from `offset` to the end of `data`. The returned offset
/// is clamped to the length of `data`.
pub fn slice_body(data: &[u8], offset: usize) -> (usize, Vec<u8>) {
	let offset = offset.min(data.len());
	let body = data[offset..].to_vec();
	log::debug!("copied {} body bytes", body.len());
	(offset, body)
}
