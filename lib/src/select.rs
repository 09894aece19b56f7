use tracing::debug;

use crate::source::SliceSource;
use crate::Candidates;
use crate::Error;
use crate::Finder;
use crate::Items;
use crate::Result;
use crate::Selected;

impl Finder {
    /// Lets the human pick from `candidates` and maps the picks back.
    ///
    /// Keyed candidates yield [`Selected::Value`]s, bare candidates yield the
    /// picked [`Selected::Line`]s. The result follows the finder's output order.
    ///
    /// # Errors
    ///
    /// - If `candidates` is empty, before anything is started
    /// - Anything [`Finder::run`] reports
    pub async fn select<V: Clone>(
        &mut self,
        candidates: &Candidates<V>,
    ) -> Result<Vec<Selected<V>>> {
        let selected = match candidates {
            Candidates::Keyed(items) => self
                .select_items(items)
                .await?
                .into_iter()
                .map(Selected::Value)
                .collect(),
            Candidates::Bare(lines) => self
                .select_lines(lines.as_slice())
                .await?
                .into_iter()
                .map(Selected::Line)
                .collect(),
        };
        Ok(selected)
    }

    /// Shows the keys of `items` and returns the values of every item whose
    /// key was picked.
    ///
    /// A picked key shared by several items yields all of their values, in
    /// `items` order.
    ///
    /// # Errors
    ///
    /// - If `items` is empty, before anything is started
    /// - Anything [`Finder::run`] reports
    pub async fn select_items<V: Clone>(&mut self, items: &Items<V>) -> Result<Vec<V>> {
        if items.is_empty() {
            return Err(Error::NoItems);
        }

        self.read(SliceSource::new(items.keys()));
        let lines = self.run().await?;
        let values = reconcile(items, &lines);
        debug!(picked = lines.len(), values = values.len(), "Mapped selection to values");
        Ok(values)
    }

    /// Shows `lines` and returns the picked ones unchanged.
    ///
    /// # Errors
    ///
    /// - If `lines` is empty, before anything is started
    /// - Anything [`Finder::run`] reports
    pub async fn select_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<Vec<String>> {
        if lines.is_empty() {
            return Err(Error::NoItems);
        }

        self.read(SliceSource::new(lines.iter().map(AsRef::as_ref)));
        let picked = self.run().await?;
        debug!(picked = picked.len(), "Selected lines");
        Ok(picked)
    }
}

/// Maps each picked line to every value keyed by it, keeping the order of
/// `lines` first and of `items` second.
fn reconcile<V: Clone>(items: &Items<V>, lines: &[String]) -> Vec<V> {
    lines
        .iter()
        .flat_map(|line| items.values_for(line).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::shell::quote;
    use crate::source::SourceImpl;
    use crate::Shell;

    /// A finder whose command line is `line`, run through `sh`.
    fn finder(line: &str) -> Finder {
        Finder::builder()
            .name("test")
            .path(line)
            .shell(Shell::default())
            .build()
    }

    /// Swallows its input and prints `output`, like a human picking lines.
    fn picking(output: &str) -> Finder {
        finder(&format!("cat >/dev/null; printf {}", quote(output)))
    }

    fn fruit() -> Items<i32> {
        [("apple", 1), ("banana", 2)].into_iter().collect()
    }

    #[rstest]
    #[case(&["banana"], &[2])]
    #[case(&["banana", "apple"], &[2, 1])]
    #[case(&["cherry"], &[])]
    #[case(&[], &[])]
    fn reconcile_works(#[case] lines: &[&str], #[case] expected: &[i32]) {
        let lines: Vec<String> = lines.iter().map(|l| (*l).to_owned()).collect();
        assert_eq!(reconcile(&fruit(), &lines), expected);
    }

    #[test]
    fn reconcile_expands_shared_keys() {
        let items: Items<i32> = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        let lines = vec!["b".to_owned(), "a".to_owned()];
        assert_eq!(reconcile(&items, &lines), [2, 1, 3]);
    }

    #[tokio::test]
    async fn select_items_maps_back_to_values() {
        let mut finder = finder("grep -x banana");
        let values = finder.select_items(&fruit()).await.unwrap();
        assert_eq!(values, [2]);
        assert!(matches!(finder.source(), SourceImpl::Slice(_)));
    }

    #[tokio::test]
    async fn select_items_feeds_keys_in_order() {
        let mut items = Items::new();
        items.add("first", "1st");
        items.add("second", "2nd");
        items.add("first", "again");

        let mut finder = finder("cat");
        let values = finder.select_items(&items).await.unwrap();
        assert_eq!(values, ["1st", "again", "2nd", "1st", "again"]);
    }

    #[tokio::test]
    async fn select_lines_keeps_finder_order() {
        let mut finder = picking(r"z\nx\n");
        let picked = finder.select_lines(&["x", "y", "z"]).await.unwrap();
        assert_eq!(picked, ["z", "x"]);
    }

    #[tokio::test]
    async fn select_dispatches_on_shape() {
        let keyed = Candidates::Keyed(fruit());
        let picked = picking(r"banana\n").select(&keyed).await.unwrap();
        assert_eq!(picked, [Selected::Value(2)]);

        let bare: Candidates<i32> = Candidates::Bare(vec!["x".to_owned(), "y".to_owned()]);
        let picked = picking(r"y\n").select(&bare).await.unwrap();
        assert_eq!(picked, [Selected::Line("y".to_owned())]);
    }

    // A shell that cannot exist proves nothing was spawned: that would fail
    // with a launch error instead.
    #[rstest]
    #[case(Candidates::Keyed(Items::new()))]
    #[case(Candidates::Bare(Vec::new()))]
    #[tokio::test]
    async fn select_empty_fails_before_spawn(#[case] candidates: Candidates<i32>) {
        let mut finder = finder("cat").with_shell(Shell::new("/nonexistent/shell"));
        let error = finder.select(&candidates).await.unwrap_err();
        assert!(matches!(error, Error::NoItems), "{error:?}");
        assert!(matches!(finder.source(), SourceImpl::Stdin(_)));
    }

    #[tokio::test]
    async fn select_propagates_run_failure() {
        let mut finder = finder("cat >/dev/null; exit 130");
        let error = finder.select_items(&fruit()).await.unwrap_err();
        assert!(error.aborted(), "{error:?}");
    }

    #[tokio::test]
    async fn select_from_json() {
        let input = serde_json::json!([
            {"key": "apple", "value": 1},
            {"key": "banana", "value": 2}
        ]);
        let candidates = Candidates::<serde_json::Value>::try_from(input).unwrap();
        let picked = picking(r"banana\n").select(&candidates).await.unwrap();
        assert_eq!(picked, [Selected::Value(serde_json::json!(2))]);
    }
}
