//! CRUD page state
//!
//! Browser counterpart of `rentdesk::crud::CrudPage`: the list is fetched on
//! mount, every add/edit/delete is followed by a refetch, and failures leave
//! the list as it was. `CrudPage` drives a `Send` API trait object on tokio,
//! so it is not built for wasm; the cycle is kept here over signals, with
//! the form mode and wording taken from `rentdesk::notify`.

use leptos::*;

use rentdesk::models::{RecordId, ValidationError};
use rentdesk::notify::{self, Notification};

pub use rentdesk::notify::FormMode;

use crate::api::{self, Resource};
use crate::state::GlobalState;

/// Signals of one CRUD page
pub struct Records<R: Resource> {
    pub items: RwSignal<Vec<R>>,
    pub loading: RwSignal<bool>,
    pub submitting: RwSignal<bool>,
    /// Open add/edit form, if any
    pub form: RwSignal<Option<FormMode>>,
    state: GlobalState,
}

impl<R: Resource> Clone for Records<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Resource> Copy for Records<R> {}

/// Create the page state and start the initial fetch
pub fn use_records<R: Resource>() -> Records<R> {
    let records = Records {
        items: create_rw_signal(Vec::new()),
        loading: create_rw_signal(true),
        submitting: create_rw_signal(false),
        form: create_rw_signal(None),
        state: expect_context::<GlobalState>(),
    };
    records.load();
    records
}

impl<R: Resource> Records<R> {
    pub fn load(&self) {
        let this = *self;
        spawn_local(async move {
            this.fetch().await;
        });
    }

    async fn fetch(&self) {
        self.loading.set(true);
        match api::list::<R>(R::COLLECTION).await {
            Ok(items) => self.items.set(items),
            Err(e) => self.state.report(
                Notification::request_failed(&e, &notify::list_failed(R::NOUN)),
                &e,
            ),
        }
        self.loading.set(false);
    }

    pub fn open_create(&self) {
        self.form.set(Some(FormMode::Create));
    }

    pub fn open_edit(&self, id: RecordId) {
        self.form.set(Some(FormMode::Edit(id)));
    }

    pub fn close(&self) {
        self.form.set(None);
    }

    pub fn find(&self, id: RecordId) -> Option<R> {
        self.items
            .with(|items| items.iter().find(|r| r.id() == id).cloned())
    }

    /// Draft to pre-fill the open form with; `None` for a blank form
    pub fn initial(&self) -> Option<R::Draft> {
        match self.form.get()? {
            FormMode::Create => None,
            FormMode::Edit(id) => self.find(id).map(|r| r.to_draft()),
        }
    }

    /// Send the form's draft, then close the form and refetch
    ///
    /// Validation errors are shown without a request; a failed request
    /// keeps the form open.
    pub fn submit(&self, draft: Result<R::Draft, ValidationError>) {
        let draft = match draft {
            Ok(draft) => draft,
            Err(e) => {
                self.state
                    .notify(Notification::error("Error").with_description(e.to_string()));
                return;
            }
        };
        let Some(mode) = self.form.get_untracked() else {
            return;
        };

        let this = *self;
        this.submitting.set(true);
        spawn_local(async move {
            let result = match mode {
                FormMode::Create => api::create(R::COLLECTION, &draft).await,
                FormMode::Edit(id) => api::update(R::COLLECTION, id, &draft).await,
            };

            match result {
                Ok(()) => {
                    this.form.set(None);
                    this.state.notify(mode.succeeded(R::NOUN));
                    this.fetch().await;
                }
                Err(e) => this.state.report(
                    Notification::request_failed(&e, &mode.failed(R::NOUN)),
                    &e,
                ),
            }
            this.submitting.set(false);
        });
    }

    pub fn delete(&self, id: RecordId) {
        let this = *self;
        spawn_local(async move {
            match api::delete(R::COLLECTION, id).await {
                Ok(()) => {
                    this.state.notify(Notification::record_changed(R::NOUN, "deleted"));
                    this.fetch().await;
                }
                Err(e) => this.state.report(
                    Notification::request_failed(&e, &notify::delete_failed(R::NOUN)),
                    &e,
                ),
            }
        });
    }
}

/// Fetch a list once for lookups (tenant names, property names)
pub fn use_lookup<R: Resource>() -> RwSignal<Vec<R>> {
    let state = expect_context::<GlobalState>();
    let items = create_rw_signal(Vec::new());
    spawn_local(async move {
        match api::list::<R>(R::COLLECTION).await {
            Ok(list) => items.set(list),
            Err(e) => state.report(
                Notification::request_failed(&e, &notify::list_failed(R::NOUN)),
                &e,
            ),
        }
    });
    items
}
