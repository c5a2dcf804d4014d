/// Hop count one further out than `hops`, saturating at `u32::MAX`.
///
/// # Examples
///
/// ```
/// assert_eq!(hopcast::util::one_further(1), 2);
/// assert_eq!(hopcast::util::one_further(u32::MAX), u32::MAX);
/// ```
pub fn one_further(hops: u32) -> u32 {
    hops.saturating_add(1)
}
