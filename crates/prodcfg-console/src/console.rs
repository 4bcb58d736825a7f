//! The product configuration console.

use prodcfg_client::{ClientError, ReferenceData, ReferenceSource};
use prodcfg_core::{
    CreateRequest, EntityId, FeeCalculationBase, FeeSpec, FeeType, GlMappingType, LedgerAccount,
    Loadable, NaiveDate, ProductConfiguration, Stored, TransactionType, UpdateRequest,
};
use prodcfg_validate::{has_blocking, is_compatible, normalize_fee, ValidationError};
use tracing::{debug, warn};

use crate::form::FormState;
use crate::kinds::{TabKind, Tabs, ValidationContext};

/// Message shown when a request fails without a decodable server message.
const TRANSPORT_FALLBACK: &str = "The request could not be completed. Please try again.";

/// What went wrong with a console operation.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// The draft failed local validation; field-level findings attached.
    /// Nothing was sent.
    #[error("validation failed")]
    Invalid(Vec<ValidationError>),
    /// The service rejected the call (or transport failed); message is
    /// what the form shows.
    #[error("{0}")]
    Remote(String),
    /// Another mutation for this tab is in flight.
    #[error("another operation for this tab is in flight")]
    Busy,
    /// The operation needs an open form and none is open.
    #[error("no form is open")]
    NoForm,
    /// The configuration has not been loaded yet.
    #[error("configuration not loaded")]
    NotLoaded,
    /// The referenced row does not exist in the loaded configuration.
    #[error("row {0} not found")]
    RowNotFound(EntityId),
    /// Delete was confirmed without a pending request.
    #[error("no delete pending confirmation")]
    NoPendingDelete,
}

impl ConsoleError {
    fn from_client(error: &ClientError) -> Self {
        match error {
            ClientError::Remote { message, .. } => Self::Remote(message.clone()),
            ClientError::Transport(_) | ClientError::Decode(_) => {
                Self::Remote(TRANSPORT_FALLBACK.to_string())
            }
        }
    }
}

/// API surface the console drives.
///
/// [`prodcfg_client::ApiClient`] is the production implementation; tests
/// provide in-memory fakes.
pub trait ConfigApi: ReferenceSource {
    /// Fetch the full configuration row set for a product.
    fn fetch_configuration(
        &self,
        product_id: EntityId,
    ) -> Result<ProductConfiguration, ClientError>;

    /// Create a configuration row.
    fn create_row<T: TabKind>(
        &self,
        product_id: EntityId,
        request: &CreateRequest<T>,
    ) -> Result<Stored<T>, ClientError>;

    /// Replace a configuration row.
    fn update_row<T: TabKind>(
        &self,
        product_id: EntityId,
        request: &UpdateRequest<T>,
    ) -> Result<Stored<T>, ClientError>;

    /// Delete a configuration row.
    fn delete_row<T: TabKind>(
        &self,
        product_id: EntityId,
        entity_id: EntityId,
    ) -> Result<(), ClientError>;
}

impl ConfigApi for prodcfg_client::ApiClient {
    fn fetch_configuration(
        &self,
        product_id: EntityId,
    ) -> Result<ProductConfiguration, ClientError> {
        self.product_configuration(product_id)
    }

    fn create_row<T: TabKind>(
        &self,
        product_id: EntityId,
        request: &CreateRequest<T>,
    ) -> Result<Stored<T>, ClientError> {
        prodcfg_client::ApiClient::create_row(self, product_id, request)
    }

    fn update_row<T: TabKind>(
        &self,
        product_id: EntityId,
        request: &UpdateRequest<T>,
    ) -> Result<Stored<T>, ClientError> {
        prodcfg_client::ApiClient::update_row(self, product_id, request)
    }

    fn delete_row<T: TabKind>(
        &self,
        product_id: EntityId,
        entity_id: EntityId,
    ) -> Result<(), ClientError> {
        prodcfg_client::ApiClient::delete_row::<T>(self, product_id, entity_id)
    }
}

/// Orchestrates one product's configuration page: per-kind form state,
/// client-side validation, the write-then-refetch cycle, and the delete
/// confirmation step.
#[derive(Debug)]
pub struct ProductConsole<A: ConfigApi> {
    api: A,
    product_id: EntityId,
    configuration: Loadable<ProductConfiguration>,
    reference: ReferenceData,
    tabs: Tabs,
    /// Last failure to (re)load the configuration; reads degrade, they
    /// never block the page.
    load_error: Option<String>,
}

impl<A: ConfigApi> ProductConsole<A> {
    /// Create a console for `product_id`. Nothing is fetched yet.
    #[must_use]
    pub fn new(api: A, product_id: EntityId) -> Self {
        Self {
            api,
            product_id,
            configuration: Loadable::Unloaded,
            reference: ReferenceData::new(),
            tabs: Tabs::default(),
            load_error: None,
        }
    }

    /// The product this console edits.
    #[must_use]
    pub const fn product_id(&self) -> EntityId {
        self.product_id
    }

    /// The underlying API client.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Current configuration load state.
    #[must_use]
    pub const fn configuration(&self) -> &Loadable<ProductConfiguration> {
        &self.configuration
    }

    /// Cached reference catalogs.
    #[must_use]
    pub const fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Last configuration load failure, if the page is degraded.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// This kind's tab state.
    #[must_use]
    pub fn tab<T: TabKind>(&self) -> &crate::form::TabState<T> {
        T::tab(&self.tabs)
    }

    /// Mutable access to the open draft of this kind's form.
    pub fn draft_mut<T: TabKind>(&mut self) -> Option<&mut T> {
        T::tab_mut(&mut self.tabs).form.draft_mut()
    }

    /// Load (or reload) the configuration and the reference catalogs.
    ///
    /// A load failure leaves any previously loaded configuration in place
    /// and records the error; the page renders stale data rather than
    /// nothing.
    pub fn load(&mut self) -> Result<(), ConsoleError> {
        if self.configuration.is_loading() {
            return Err(ConsoleError::Busy);
        }
        let previous = std::mem::replace(&mut self.configuration, Loadable::Loading);

        if let Err(error) = self.reference.ensure_loaded(&self.api) {
            warn!(%error, "reference data load failed");
        }

        match self.api.fetch_configuration(self.product_id) {
            Ok(configuration) => {
                debug!(product_id = self.product_id, "configuration loaded");
                self.configuration = Loadable::Loaded(configuration);
                self.load_error = None;
                Ok(())
            }
            Err(error) => {
                let surfaced = ConsoleError::from_client(&error);
                warn!(%error, "configuration load failed");
                self.configuration = previous;
                self.load_error = Some(surfaced.to_string());
                Err(surfaced)
            }
        }
    }

    /// Refresh the reference catalogs on demand.
    pub fn refresh_reference(&mut self) -> Result<(), ConsoleError> {
        self.reference
            .refresh(&self.api)
            .map_err(|e| ConsoleError::from_client(&e))
    }

    fn loaded_configuration(&self) -> Result<&ProductConfiguration, ConsoleError> {
        self.configuration.loaded().ok_or(ConsoleError::NotLoaded)
    }

    /// Open the blank "add" form for a kind, seeding it with `draft`.
    /// Replaces any open edit form for the same kind.
    pub fn open_add<T: TabKind>(&mut self, draft: T) -> Result<(), ConsoleError> {
        self.loaded_configuration()?;
        let tab = T::tab_mut(&mut self.tabs);
        if tab.in_flight {
            return Err(ConsoleError::Busy);
        }
        tab.form = FormState::Adding(draft);
        tab.error = None;
        Ok(())
    }

    /// Open the edit form for a row, pre-filled with its stored fields.
    /// Replaces any open add form for the same kind.
    pub fn open_edit<T: TabKind>(&mut self, id: EntityId) -> Result<(), ConsoleError> {
        let configuration = self.loaded_configuration()?;
        let row = T::rows(configuration)
            .iter()
            .find(|r| r.id == id)
            .ok_or(ConsoleError::RowNotFound(id))?;
        let draft = row.spec.clone();
        let tab = T::tab_mut(&mut self.tabs);
        if tab.in_flight {
            return Err(ConsoleError::Busy);
        }
        tab.form = FormState::Editing(id, draft);
        tab.error = None;
        Ok(())
    }

    /// Close this kind's form without submitting.
    pub fn cancel<T: TabKind>(&mut self) {
        T::tab_mut(&mut self.tabs).reset();
    }

    /// Submit the open form: validate, project, send, and on success close
    /// the form and refetch the whole configuration. On failure the form
    /// stays open with the entered values intact.
    pub fn submit<T: TabKind>(&mut self) -> Result<(), ConsoleError> {
        let configuration = self.configuration.loaded().ok_or(ConsoleError::NotLoaded)?;

        let tab = T::tab(&self.tabs);
        if tab.in_flight {
            return Err(ConsoleError::Busy);
        }
        let (draft, editing) = match &tab.form {
            FormState::Viewing => return Err(ConsoleError::NoForm),
            FormState::Adding(draft) => (draft.clone(), None),
            FormState::Editing(id, draft) => (draft.clone(), Some(*id)),
        };

        let cx = ValidationContext {
            configuration,
            reference: &self.reference,
            editing,
        };
        let projected = draft.project(&cx);
        let findings = projected.validate(&cx);
        if has_blocking(&findings) {
            return Err(ConsoleError::Invalid(findings));
        }

        T::tab_mut(&mut self.tabs).in_flight = true;
        let result = match editing {
            None => self
                .api
                .create_row(self.product_id, &CreateRequest::new(projected))
                .map(|_| ()),
            Some(id) => self
                .api
                .update_row(self.product_id, &UpdateRequest::new(id, projected))
                .map(|_| ()),
        };
        let tab = T::tab_mut(&mut self.tabs);
        tab.in_flight = false;

        match result {
            Ok(()) => {
                tab.reset();
                self.refetch_after_write();
                Ok(())
            }
            Err(error) => {
                let surfaced = ConsoleError::from_client(&error);
                tab.error = Some(surfaced.to_string());
                Err(surfaced)
            }
        }
    }

    /// First step of deletion: remember the row and wait for confirmation.
    pub fn request_delete<T: TabKind>(&mut self, id: EntityId) -> Result<(), ConsoleError> {
        let configuration = self.loaded_configuration()?;
        if !T::rows(configuration).iter().any(|r| r.id == id) {
            return Err(ConsoleError::RowNotFound(id));
        }
        let tab = T::tab_mut(&mut self.tabs);
        if tab.in_flight {
            return Err(ConsoleError::Busy);
        }
        tab.pending_delete = Some(id);
        Ok(())
    }

    /// Abandon a pending deletion.
    pub fn cancel_delete<T: TabKind>(&mut self) {
        T::tab_mut(&mut self.tabs).pending_delete = None;
    }

    /// Confirm the pending deletion. On success the configuration is
    /// refetched; on failure the error is surfaced and nothing retried.
    pub fn confirm_delete<T: TabKind>(&mut self) -> Result<(), ConsoleError> {
        let tab = T::tab_mut(&mut self.tabs);
        if tab.in_flight {
            return Err(ConsoleError::Busy);
        }
        let id = tab.pending_delete.take().ok_or(ConsoleError::NoPendingDelete)?;

        tab.in_flight = true;
        let result = self.api.delete_row::<T>(self.product_id, id);
        let tab = T::tab_mut(&mut self.tabs);
        tab.in_flight = false;

        match result {
            Ok(()) => {
                tab.error = None;
                self.refetch_after_write();
                Ok(())
            }
            Err(error) => {
                let surfaced = ConsoleError::from_client(&error);
                tab.error = Some(surfaced.to_string());
                Err(surfaced)
            }
        }
    }

    /// No optimistic merge: the row set always comes back from the server
    /// so server-computed fields cannot drift.
    fn refetch_after_write(&mut self) {
        match self.api.fetch_configuration(self.product_id) {
            Ok(configuration) => {
                self.configuration.replace(configuration);
                self.load_error = None;
            }
            Err(error) => {
                warn!(%error, "refetch after write failed");
                self.load_error = Some(ConsoleError::from_client(&error).to_string());
            }
        }
    }

    /// Ledger accounts offered for a mapping type: compatible and active.
    #[must_use]
    pub fn selectable_accounts(&self, mapping_type: GlMappingType) -> Vec<&LedgerAccount> {
        self.reference
            .ledger_accounts()
            .iter()
            .filter(|account| is_compatible(mapping_type, account))
            .collect()
    }

    /// Number of this kind's rows currently effective on `as_of`, for the
    /// overview tab.
    #[must_use]
    pub fn open_rows<T: TabKind + prodcfg_core::Windowed>(&self, as_of: NaiveDate) -> usize {
        self.configuration
            .loaded()
            .map_or(0, |c| prodcfg_validate::open_count(T::rows(c), as_of))
    }

    /// Change the open fee draft's calculation base, then normalize.
    pub fn set_fee_calculation_base(
        &mut self,
        base: FeeCalculationBase,
    ) -> Result<(), ConsoleError> {
        self.update_fee_draft(|draft| draft.calculation_base = base)
    }

    /// Change the open fee draft's fee type, then normalize.
    pub fn set_fee_type(&mut self, fee_type: FeeType) -> Result<(), ConsoleError> {
        self.update_fee_draft(|draft| draft.fee_type = fee_type)
    }

    /// Change the open fee draft's transaction type, then normalize.
    pub fn set_fee_transaction_type(
        &mut self,
        transaction_type: Option<TransactionType>,
    ) -> Result<(), ConsoleError> {
        self.update_fee_draft(|draft| draft.transaction_type = transaction_type)
    }

    /// All three fee change handlers converge here: one mutation, then the
    /// one idempotent normalization.
    fn update_fee_draft(&mut self, change: impl FnOnce(&mut FeeSpec)) -> Result<(), ConsoleError> {
        let draft = self
            .draft_mut::<FeeSpec>()
            .ok_or(ConsoleError::NoForm)?;
        change(draft);
        normalize_fee(draft);
        Ok(())
    }
}
