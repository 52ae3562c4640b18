/// Picks the nav dot that represents section `index`: the dot targeting the
/// highest section at or before it. Sections without a dot of their own
/// (gallery pages after the first) light the dot they belong under.
pub fn representative_target<I>(targets: I, index: usize) -> Option<usize>
where
    I: IntoIterator<Item = usize>,
{
    targets.into_iter().filter(|target| *target <= index).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_DOTS: [usize; 5] = [0, 1, 2, 5, 6];

    #[test]
    fn exact_dot_wins() {
        assert_eq!(representative_target(PAGE_DOTS, 0), Some(0));
        assert_eq!(representative_target(PAGE_DOTS, 5), Some(5));
        assert_eq!(representative_target(PAGE_DOTS, 6), Some(6));
    }

    #[test]
    fn gallery_pages_light_their_group_dot() {
        assert_eq!(representative_target(PAGE_DOTS, 3), Some(2));
        assert_eq!(representative_target(PAGE_DOTS, 4), Some(2));
    }

    #[test]
    fn no_dot_at_or_before_index() {
        assert_eq!(representative_target([2, 3], 1), None);
        assert_eq!(representative_target([], 4), None);
    }
}
