use crate::content::ContentItem;

use super::error::StoreError;

/// Reset every `order` to the item's index.
pub fn renumber(items: &mut [ContentItem]) {
    for (idx, item) in items.iter_mut().enumerate() {
        item.order = idx;
    }
}

/// Move the element at `source` so it ends up at `destination`, shifting the
/// elements in between, then renumber.
///
/// Both indices must be `< items.len()`. On error the list is untouched.
pub fn move_item(
    items: &mut Vec<ContentItem>,
    source: usize,
    destination: usize,
) -> Result<(), StoreError> {
    let len = items.len();
    if source >= len {
        return Err(StoreError::InvalidOperation(format!(
            "source index {} out of range for list of {}",
            source, len
        )));
    }
    if destination >= len {
        return Err(StoreError::InvalidOperation(format!(
            "destination index {} out of range for list of {}",
            destination, len
        )));
    }

    if source != destination {
        let item = items.remove(source);
        items.insert(destination, item);
    }
    renumber(items);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentPayload, MovieRecommendation};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn items(n: usize) -> Vec<ContentItem> {
        (0..n)
            .map(|i| {
                ContentItem::new(
                    ContentPayload::Movie(MovieRecommendation {
                        id: i.to_string(),
                        title: format!("Movie {}", i),
                        overview: String::new(),
                        poster_path: String::new(),
                        release_date: "2024-01-01".to_string(),
                        vote_average: 7.0,
                        genre_ids: Vec::new(),
                        category: "entertainment".to_string(),
                    }),
                    i,
                )
            })
            .collect()
    }

    fn ids(items: &[ContentItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_move_forward_shifts_not_swaps() {
        let mut list = items(4);
        move_item(&mut list, 0, 2).unwrap();
        assert_eq!(ids(&list), vec!["movie-1", "movie-2", "movie-0", "movie-3"]);
    }

    #[test]
    fn test_move_backward() {
        let mut list = items(4);
        move_item(&mut list, 3, 0).unwrap();
        assert_eq!(ids(&list), vec!["movie-3", "movie-0", "movie-1", "movie-2"]);
    }

    #[test]
    fn test_same_index_is_identity() {
        let mut list = items(3);
        let before = list.clone();
        move_item(&mut list, 1, 1).unwrap();
        assert_eq!(list, before);
    }

    #[test]
    fn test_out_of_range_rejected_without_change() {
        let mut list = items(3);
        let before = list.clone();
        assert!(matches!(
            move_item(&mut list, 3, 0),
            Err(StoreError::InvalidOperation(_))
        ));
        assert!(matches!(
            move_item(&mut list, 0, 3),
            Err(StoreError::InvalidOperation(_))
        ));
        assert_eq!(list, before);
    }

    #[test]
    fn test_empty_list_rejects_any_move() {
        let mut list = Vec::new();
        assert!(move_item(&mut list, 0, 0).is_err());
    }

    #[test]
    fn test_renumber_fixes_stale_orders() {
        let mut list = items(3);
        list[0].order = 9;
        list[2].order = 0;
        renumber(&mut list);
        let orders: Vec<_> = list.iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    proptest! {
        #[test]
        fn prop_orders_dense_after_move(len in 1usize..20, a in 0usize..20, b in 0usize..20) {
            let mut list = items(len);
            let (src, dst) = (a % len, b % len);
            move_item(&mut list, src, dst).unwrap();
            for (idx, item) in list.iter().enumerate() {
                prop_assert_eq!(item.order, idx);
            }
        }

        #[test]
        fn prop_move_preserves_membership(len in 1usize..20, a in 0usize..20, b in 0usize..20) {
            let mut list = items(len);
            let (src, dst) = (a % len, b % len);
            let moved_id = list[src].id.clone();
            move_item(&mut list, src, dst).unwrap();

            prop_assert_eq!(list.len(), len);
            prop_assert_eq!(&list[dst].id, &moved_id);
            let mut sorted: Vec<String> = list.iter().map(|i| i.id.clone()).collect();
            sorted.sort();
            let mut expected: Vec<String> = items(len).into_iter().map(|i| i.id).collect();
            expected.sort();
            prop_assert_eq!(sorted, expected);
        }
    }
}
