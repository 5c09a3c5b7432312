// ── Entity list page ──

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::CatalogBackend;
use crate::confirm::Confirm;
use crate::editor::entity::FormResource;
use crate::editor::sku::DeleteResult;
use crate::editor::{LoadState, Outcome};
use crate::error::CoreError;
use crate::model::ResourceId;
use crate::notify::{Notice, NoticeSet, messages};

/// All entities of one kind, with per-item delete.
pub struct ListPage<B, R> {
    backend: Arc<B>,
    state: LoadState,
    items: Vec<R>,
    _kind: PhantomData<fn() -> R>,
}

impl<B: CatalogBackend, R: FormResource> ListPage<B, R> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: LoadState::Loading,
            items: Vec::new(),
            _kind: PhantomData,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub async fn load(&mut self) -> Outcome<Result<(), CoreError>> {
        self.state = LoadState::Loading;
        match R::list(self.backend.as_ref()).await {
            Ok(items) => {
                debug!(kind = R::NAME, count = items.len(), "list loaded");
                self.items = items;
                self.state = LoadState::Ready;
                Outcome::new(Ok(()))
            }
            Err(e) => {
                warn!(kind = R::NAME, error = %e, "list load failed");
                self.state = LoadState::Failed(e.to_string());
                let notice = Notice::error(messages::LOAD_FAILED).with_detail(&e);
                Outcome::new(Err(e)).with_notice(notice)
            }
        }
    }

    /// Delete by id after confirmation; the item leaves the list only
    /// once the backend accepted the delete.
    pub async fn delete(
        &mut self,
        id: &ResourceId,
        confirm: &mut impl Confirm,
    ) -> Outcome<Result<DeleteResult, CoreError>> {
        let Some(item) = self.items.iter().find(|i| i.id() == Some(id)) else {
            return Outcome::new(Err(CoreError::not_found(R::NAME, id)));
        };
        if !confirm.confirm(&messages::confirm_delete(item.display_name())) {
            return Outcome::new(Ok(DeleteResult::Cancelled));
        }

        let result = R::remove(self.backend.as_ref(), id).await;
        let notice = NoticeSet::REMOVE.resolve(&result);
        match result {
            Ok(()) => {
                self.items.retain(|i| i.id() != Some(id));
                Outcome::new(Ok(DeleteResult::Deleted)).with_notice(notice)
            }
            Err(e) => {
                warn!(kind = R::NAME, %id, error = %e, "delete failed");
                Outcome::new(Err(e)).with_notice(notice)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::testing::{Call, FakeBackend, category};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn delete_removes_only_the_confirmed_item() {
        let backend = Arc::new(FakeBackend::with_categories(vec![
            category(1, "Camisetas"),
            category(2, "Bonés"),
        ]));
        let mut page: ListPage<_, Category> = ListPage::new(Arc::clone(&backend));
        page.load().await.value.unwrap();

        let mut asked = String::new();
        let outcome = page
            .delete(&ResourceId::from(2), &mut |p: &str| {
                asked = p.to_owned();
                true
            })
            .await;

        assert_eq!(outcome.value.unwrap(), DeleteResult::Deleted);
        assert_eq!(asked, "Deseja realmente excluir Bonés!");
        let names: Vec<_> = page.items().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Camisetas"]);
        assert_eq!(backend.calls().last(), Some(&Call::DeleteCategory(ResourceId::from(2))));
    }

    #[tokio::test]
    async fn failed_list_is_reported() {
        let backend = Arc::new(FakeBackend::default());
        backend.fail_fetches();
        let mut page: ListPage<_, Category> = ListPage::new(Arc::clone(&backend));

        let outcome = page.load().await;
        assert!(outcome.value.is_err());
        assert!(outcome.notice.unwrap().is_error());
        assert!(matches!(page.state(), LoadState::Failed(_)));
    }
}
