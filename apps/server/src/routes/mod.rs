pub mod museums;
pub mod user_museums;

/// Offsets that are missing, negative or not numbers all mean the first page.
pub(crate) fn parse_offset(offset: Option<&str>) -> u32 {
	offset
		.and_then(|offset| offset.trim().parse::<u32>().ok())
		.unwrap_or(0)
}
