//! Application state and page state definitions.
//!
//! Input handling never touches the network. [`App::handle_action`] turns
//! key actions into [`Dispatch`]es; the event loop runs them and feeds each
//! [`Outcome`] back through [`App::apply`], which drops anything whose
//! ticket is no longer the latest the page has issued.

use crate::config::TuiConfig;
use crate::dispatch::{CallFailure, Dispatch, GatewayCall, Outcome, Reply, Target};
use crate::forms::{MatchForm, MultiMatchPageForm, RangeForm, TermForm, WildcardForm};
use crate::keys::{Action, InputMode};
use crate::nav::Page;
use crate::notifications::Notification;
use crate::theme::SynthBruteTheme;
use crate::traits::PageForm;
use searchlab_core::{
    aggregations, complex_search, fuzzy_search, match_query, multi_match, prefix_match,
    range_filter, vector_pair, wildcard_match, AggregationReport, AckEnvelope, ComplexForm,
    DisplayItem, FailureKind, ProductForm, Projection, QueryError, RequestSequencer,
    SearchEnvelope, SearchRequest, Ticket, VectorKind, VectorMode, INDEX_NOT_FOUND_ALERT,
};
use std::collections::HashMap;
use tracing::debug;

const SEARCH_ERROR: &str = "Error performing search";

pub const CATALOG_INDEX_STARTED: &str = "Product catalog indexing started";
pub const CATALOG_INDEX_IN_PROGRESS: &str =
    "Product catalog indexing in-progress. You can now try Keyword search";
pub const CATALOG_INDEX_FAILED: &str = "Product catalog indexing failed";
pub const CATALOG_INDEX_DELETED: &str = "Product catalog index deleted";
pub const CATALOG_INDEX_DELETE_FAILED: &str = "Product catalog index deletion failed";
pub const VECTOR_INDEX_CREATED: &str = "Successfully indexed products with vector embeddings";
pub const VECTOR_INDEX_FAILED: &str = "Failed to index products";
pub const VECTOR_INDEX_DELETED: &str = "Product catalog vector index deleted";
pub const VECTOR_INDEX_DELETE_FAILED: &str = "Product catalog vector index deletion failed";
pub const UPLOAD_SUCCEEDED: &str = "Product uploaded and indexed successfully!";
pub const UPLOAD_FAILED: &str = "Failed to upload product. Please try again.";

/// Status every page carries regardless of what it shows.
#[derive(Debug, Clone, Default)]
pub struct PageStatus {
    pub focus: usize,
    pub loading: bool,
    pub alert: Option<Notification>,
    pub sequencer: RequestSequencer,
    pub scroll: usize,
}

/// Cards and suggestions of a single-list search page.
#[derive(Debug, Clone, Default)]
pub struct ResultList {
    pub items: Vec<DisplayItem>,
    pub suggestions: Vec<String>,
    pub took: Option<u64>,
    pub total: Option<u64>,
    /// Term the latest request was issued with; highlighting uses it.
    pub submitted_term: String,
}

/// One half of a comparison page.
#[derive(Debug, Clone, Default)]
pub struct LegState {
    pub items: Vec<DisplayItem>,
    pub took: Option<u64>,
    pub total: Option<u64>,
    pub loading: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Comparison {
    pub on_disk: LegState,
    pub in_memory: LegState,
    pub submitted_term: String,
}

impl Comparison {
    pub fn leg(&self, mode: VectorMode) -> &LegState {
        match mode {
            VectorMode::OnDisk => &self.on_disk,
            VectorMode::InMemory => &self.in_memory,
        }
    }

    pub fn leg_mut(&mut self, mode: VectorMode) -> &mut LegState {
        match mode {
            VectorMode::OnDisk => &mut self.on_disk,
            VectorMode::InMemory => &mut self.in_memory,
        }
    }
}

/// Which index operation an index page is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexAction {
    Create,
    Delete,
}

/// How a search page words its failures.
#[derive(Debug, Clone, Copy)]
struct FailurePolicy {
    /// Report every backend failure as a missing catalog index.
    catalog_only: bool,
    prefix: &'static str,
}

pub struct App {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub active_page: Page,
    pub mode: InputMode,
    pub show_help: bool,
    pub should_quit: bool,
    pub home_selected: usize,

    pub status: HashMap<Page, PageStatus>,
    pub results: HashMap<Page, ResultList>,

    pub prefix_form: TermForm,
    pub match_form: MatchForm,
    pub multi_match_form: MultiMatchPageForm,
    pub wildcard_form: WildcardForm,
    pub range_form: RangeForm,
    pub fuzzy_form: TermForm,
    pub complex_form: ComplexForm,
    pub vector_form: TermForm,
    pub hybrid_form: TermForm,
    pub upload_form: ProductForm,

    pub vector_results: Comparison,
    pub hybrid_results: Comparison,
    pub aggregation_report: Option<AggregationReport>,
    pub aggregation_took: Option<u64>,
    pub catalog_action: Option<IndexAction>,
    pub vector_action: Option<IndexAction>,
}

impl App {
    pub fn new(config: TuiConfig) -> Self {
        Self {
            config,
            theme: SynthBruteTheme::synthbrute(),
            active_page: Page::Home,
            mode: InputMode::Normal,
            show_help: false,
            should_quit: false,
            home_selected: 0,
            status: Page::all().iter().map(|p| (*p, PageStatus::default())).collect(),
            results: HashMap::new(),
            prefix_form: TermForm::with_attribute(),
            match_form: MatchForm::default(),
            multi_match_form: MultiMatchPageForm::default(),
            wildcard_form: WildcardForm::default(),
            range_form: RangeForm::default(),
            fuzzy_form: TermForm::term_only(),
            complex_form: ComplexForm::default(),
            vector_form: TermForm::term_only(),
            hybrid_form: TermForm::term_only(),
            upload_form: ProductForm::default(),
            vector_results: Comparison::default(),
            hybrid_results: Comparison::default(),
            aggregation_report: None,
            aggregation_took: None,
            catalog_action: None,
            vector_action: None,
        }
    }

    pub fn status(&self, page: Page) -> Option<&PageStatus> {
        self.status.get(&page)
    }

    pub fn status_mut(&mut self, page: Page) -> &mut PageStatus {
        self.status.entry(page).or_default()
    }

    pub fn results(&self, page: Page) -> Option<&ResultList> {
        self.results.get(&page)
    }

    pub fn comparison(&self, page: Page) -> Option<&Comparison> {
        match page {
            Page::VectorSearch => Some(&self.vector_results),
            Page::HybridSearch => Some(&self.hybrid_results),
            _ => None,
        }
    }

    fn comparison_mut(&mut self, page: Page) -> Option<&mut Comparison> {
        match page {
            Page::VectorSearch => Some(&mut self.vector_results),
            Page::HybridSearch => Some(&mut self.hybrid_results),
            _ => None,
        }
    }

    pub fn form(&self, page: Page) -> Option<&dyn PageForm> {
        match page {
            Page::Prefix => Some(&self.prefix_form),
            Page::Match => Some(&self.match_form),
            Page::MultiMatch => Some(&self.multi_match_form),
            Page::Wildcard => Some(&self.wildcard_form),
            Page::Range => Some(&self.range_form),
            Page::Fuzzy => Some(&self.fuzzy_form),
            Page::Complex => Some(&self.complex_form),
            Page::VectorSearch => Some(&self.vector_form),
            Page::HybridSearch => Some(&self.hybrid_form),
            Page::Upload => Some(&self.upload_form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self, page: Page) -> Option<&mut dyn PageForm> {
        match page {
            Page::Prefix => Some(&mut self.prefix_form),
            Page::Match => Some(&mut self.match_form),
            Page::MultiMatch => Some(&mut self.multi_match_form),
            Page::Wildcard => Some(&mut self.wildcard_form),
            Page::Range => Some(&mut self.range_form),
            Page::Fuzzy => Some(&mut self.fuzzy_form),
            Page::Complex => Some(&mut self.complex_form),
            Page::VectorSearch => Some(&mut self.vector_form),
            Page::HybridSearch => Some(&mut self.hybrid_form),
            Page::Upload => Some(&mut self.upload_form),
            _ => None,
        }
    }

    pub fn alert(&mut self, page: Page, notification: Notification) {
        self.status_mut(page).alert = Some(notification);
    }

    pub fn switch_to(&mut self, page: Page) {
        self.active_page = page;
        self.mode = InputMode::Normal;
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    pub fn handle_action(&mut self, action: Action) -> Vec<Dispatch> {
        let page = self.active_page;
        match action {
            Action::Quit => {
                self.should_quit = true;
                Vec::new()
            }
            Action::NextPage => {
                self.switch_to(page.next());
                Vec::new()
            }
            Action::PrevPage => {
                self.switch_to(page.previous());
                Vec::new()
            }
            Action::SwitchPage(index) => {
                if let Some(target) = Page::from_index(index) {
                    self.switch_to(target);
                }
                Vec::new()
            }
            Action::MoveUp => {
                self.move_focus(-1);
                Vec::new()
            }
            Action::MoveDown => {
                self.move_focus(1);
                Vec::new()
            }
            Action::ScrollUp => {
                let status = self.status_mut(page);
                status.scroll = status.scroll.saturating_sub(1);
                Vec::new()
            }
            Action::ScrollDown => {
                self.status_mut(page).scroll += 1;
                Vec::new()
            }
            Action::StartEdit => {
                let focus = self.focus();
                if self.form(page).map(|f| f.is_text(focus)).unwrap_or(false) {
                    self.mode = InputMode::Editing;
                }
                Vec::new()
            }
            Action::Cancel => {
                self.mode = InputMode::Normal;
                Vec::new()
            }
            Action::Insert(c) => self.edit_text(|text| text.push(c)),
            Action::Backspace => self.edit_text(|text| {
                text.pop();
            }),
            Action::Toggle => {
                let focus = self.focus();
                if let Some(form) = self.form_mut(page) {
                    form.toggle(focus);
                }
                Vec::new()
            }
            Action::Increase | Action::Decrease => {
                let delta = if action == Action::Increase { 1 } else { -1 };
                let focus = self.focus();
                if let Some(form) = self.form_mut(page) {
                    form.adjust(focus, delta);
                }
                Vec::new()
            }
            Action::Submit => {
                self.mode = InputMode::Normal;
                self.submit()
            }
            Action::Delete => self.delete(),
            Action::Dismiss => {
                self.status_mut(page).alert = None;
                Vec::new()
            }
            Action::OpenHelp => {
                self.show_help = !self.show_help;
                Vec::new()
            }
        }
    }

    fn focus(&self) -> usize {
        self.status(self.active_page).map(|s| s.focus).unwrap_or(0)
    }

    fn move_focus(&mut self, delta: i32) {
        let page = self.active_page;
        if page == Page::Home {
            let len = Page::all().len();
            self.home_selected = if delta < 0 {
                (self.home_selected + len - 1) % len
            } else {
                (self.home_selected + 1) % len
            };
            return;
        }
        let rows = self.form(page).map(|f| f.row_count()).unwrap_or(0);
        if rows == 0 {
            return;
        }
        let status = self.status_mut(page);
        status.focus = if delta < 0 {
            status.focus.saturating_sub(1)
        } else {
            (status.focus + 1).min(rows - 1)
        };
        let focus = status.focus;
        if self.mode == InputMode::Editing
            && !self.form(page).map(|f| f.is_text(focus)).unwrap_or(false)
        {
            self.mode = InputMode::Normal;
        }
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) -> Vec<Dispatch> {
        let page = self.active_page;
        let focus = self.focus();
        match self.form_mut(page).and_then(|f| f.text_mut(focus)) {
            Some(text) => edit(text),
            None => return Vec::new(),
        }
        self.search_as_you_type()
    }

    /// Lookups issued on every keystroke. Prefix fills its suggestion list
    /// from the chosen attribute; multi-match refreshes the cards.
    fn search_as_you_type(&mut self) -> Vec<Dispatch> {
        let page = self.active_page;
        match page {
            Page::Prefix => {
                let request = prefix_match(self.prefix_form.attribute, &self.prefix_form.term);
                let ticket = self.status_mut(page).sequencer.issue();
                vec![Dispatch {
                    page,
                    target: Target::Suggestions,
                    ticket,
                    call: GatewayCall::Search(request),
                }]
            }
            Page::MultiMatch => {
                let term = self.multi_match_form.term.clone();
                match multi_match(&self.multi_match_form.fields, &term) {
                    Ok(request) => {
                        self.results.entry(page).or_default().submitted_term = term;
                        self.single(page, Target::Results, GatewayCall::Search(request))
                    }
                    Err(err) => {
                        debug!(page = page.title(), error = %err, "keystroke search skipped");
                        Vec::new()
                    }
                }
            }
            _ => Vec::new(),
        }
    }

    // ========================================================================
    // SUBMISSION
    // ========================================================================

    /// Primary action of the active page.
    pub fn submit(&mut self) -> Vec<Dispatch> {
        let page = self.active_page;
        match page {
            Page::Home => {
                if let Some(target) = Page::from_index(self.home_selected) {
                    self.switch_to(target);
                }
                Vec::new()
            }
            Page::Config => Vec::new(),
            Page::IndexCatalog => {
                self.catalog_action = Some(IndexAction::Create);
                self.alert(page, Notification::info(CATALOG_INDEX_STARTED));
                self.single(page, Target::Results, GatewayCall::CreateIndex)
            }
            Page::VectorIndex => {
                self.vector_action = Some(IndexAction::Create);
                self.single(page, Target::Results, GatewayCall::VectorizeIndex)
            }
            Page::Aggregations => {
                self.single(page, Target::Results, GatewayCall::Search(aggregations()))
            }
            Page::Upload => {
                let form = self.upload_form.clone();
                self.single(page, Target::Results, GatewayCall::Upload(form))
            }
            Page::VectorSearch | Page::HybridSearch => self.submit_comparison(page),
            _ => {
                let (built, term) = self.build_search(page);
                match built {
                    Ok(request) => {
                        self.results.entry(page).or_default().submitted_term = term;
                        self.single(page, Target::Results, GatewayCall::Search(request))
                    }
                    Err(err) => {
                        self.reject(page, err);
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Secondary action: drop the index managed by the active page.
    pub fn delete(&mut self) -> Vec<Dispatch> {
        let page = self.active_page;
        match page {
            Page::IndexCatalog => {
                self.catalog_action = Some(IndexAction::Delete);
                self.single(page, Target::Results, GatewayCall::DeleteIndex)
            }
            Page::VectorIndex => {
                self.vector_action = Some(IndexAction::Delete);
                self.single(page, Target::Results, GatewayCall::DeleteVectorIndex)
            }
            _ => Vec::new(),
        }
    }

    fn build_search(&self, page: Page) -> (Result<SearchRequest, QueryError>, String) {
        match page {
            Page::Prefix => (
                Ok(prefix_match(self.prefix_form.attribute, &self.prefix_form.term)),
                self.prefix_form.term.clone(),
            ),
            Page::Match => (
                match_query(
                    self.match_form.attribute,
                    &self.match_form.term,
                    self.match_form.minimum_should_match,
                ),
                self.match_form.term.clone(),
            ),
            Page::MultiMatch => (
                multi_match(&self.multi_match_form.fields, &self.multi_match_form.term),
                self.multi_match_form.term.clone(),
            ),
            Page::Wildcard => (
                wildcard_match(
                    self.wildcard_form.attribute,
                    &self.wildcard_form.pattern,
                    self.wildcard_form.case_insensitive,
                ),
                self.wildcard_form.pattern.clone(),
            ),
            Page::Range => (
                range_filter(self.range_form.operator, &self.range_form.value),
                String::new(),
            ),
            Page::Fuzzy => (fuzzy_search(&self.fuzzy_form.term), self.fuzzy_form.term.clone()),
            _ => (
                complex_search(&self.complex_form),
                self.complex_form.search_value.clone(),
            ),
        }
    }

    fn submit_comparison(&mut self, page: Page) -> Vec<Dispatch> {
        let (kind, term) = match page {
            Page::HybridSearch => (VectorKind::Hybrid, self.hybrid_form.term.clone()),
            _ => (VectorKind::Vector, self.vector_form.term.clone()),
        };
        let legs = match vector_pair(kind, &term) {
            Ok(legs) => legs,
            Err(err) => {
                self.reject(page, err);
                return Vec::new();
            }
        };

        // Both legs share one ticket; each reply fills its own half.
        let status = self.status_mut(page);
        let ticket = status.sequencer.issue();
        status.alert = None;
        if let Some(comparison) = self.comparison_mut(page) {
            comparison.submitted_term = term;
            for mode in [VectorMode::OnDisk, VectorMode::InMemory] {
                let leg = comparison.leg_mut(mode);
                leg.items.clear();
                leg.took = None;
                leg.total = None;
                leg.loading = true;
            }
        }
        let [on_disk, in_memory] = legs;
        vec![
            Dispatch {
                page,
                target: Target::Leg(VectorMode::OnDisk),
                ticket,
                call: GatewayCall::Search(on_disk),
            },
            Dispatch {
                page,
                target: Target::Leg(VectorMode::InMemory),
                ticket,
                call: GatewayCall::Search(in_memory),
            },
        ]
    }

    fn single(&mut self, page: Page, target: Target, call: GatewayCall) -> Vec<Dispatch> {
        let status = self.status_mut(page);
        let ticket = status.sequencer.issue();
        status.loading = true;
        if page != Page::IndexCatalog {
            status.alert = None;
        }
        vec![Dispatch {
            page,
            target,
            ticket,
            call,
        }]
    }

    fn reject(&mut self, page: Page, err: QueryError) {
        debug!(page = page.title(), error = %err, "validation rejected input");
        if err.is_silent() {
            return;
        }
        let note = if err.is_warning() {
            Notification::warning(err.to_string())
        } else {
            Notification::error(err.to_string())
        };
        self.alert(page, note);
    }

    // ========================================================================
    // OUTCOMES
    // ========================================================================

    /// Apply a finished call. Returns false when the outcome was stale.
    pub fn apply(&mut self, outcome: Outcome) -> bool {
        let Outcome {
            page,
            target,
            ticket,
            result,
        } = outcome;
        if !self.is_current(page, ticket) {
            debug!(
                page = page.title(),
                ticket = ticket.value(),
                "dropping stale outcome"
            );
            return false;
        }

        match page {
            Page::IndexCatalog => self.apply_catalog_index(result),
            Page::VectorIndex => self.apply_vector_index(result),
            Page::Aggregations => self.apply_aggregations(result),
            Page::Upload => self.apply_upload(result),
            Page::VectorSearch | Page::HybridSearch => {
                if let Target::Leg(mode) = target {
                    self.apply_leg(page, mode, result);
                }
            }
            Page::Home | Page::Config => {}
            _ => self.apply_search(page, target, result),
        }
        true
    }

    fn is_current(&self, page: Page, ticket: Ticket) -> bool {
        self.status(page)
            .map(|s| s.sequencer.is_current(ticket))
            .unwrap_or(false)
    }

    fn finish(&mut self, page: Page, alert: Option<Notification>) {
        let status = self.status_mut(page);
        status.loading = false;
        if alert.is_some() {
            status.alert = alert;
        }
    }

    fn apply_search(&mut self, page: Page, target: Target, result: Result<Reply, CallFailure>) {
        let envelope = match result {
            Ok(Reply::Search(envelope)) => envelope,
            Ok(_) => {
                self.finish(page, None);
                return;
            }
            Err(failure) => {
                let alert = search_failure_alert(failure_policy(page), &failure);
                self.finish(page, Some(alert));
                return;
            }
        };

        let attribute = self.prefix_form.attribute;
        let list = self.results.entry(page).or_default();
        match target {
            Target::Suggestions => {
                list.suggestions = envelope
                    .records()
                    .map(|r| r.attribute_text(attribute))
                    .collect();
            }
            _ => {
                let projection = projection_for(page, &list.submitted_term);
                list.items = projection.project_all(&envelope);
                list.took = envelope.took();
                list.total = envelope.total();
                list.suggestions.clear();
                self.status_mut(page).scroll = 0;
            }
        }
        self.finish(page, None);
    }

    fn apply_leg(&mut self, page: Page, mode: VectorMode, result: Result<Reply, CallFailure>) {
        let mut alert = None;
        if let Some(comparison) = self.comparison_mut(page) {
            let term = comparison.submitted_term.clone();
            let leg = comparison.leg_mut(mode);
            leg.loading = false;
            match result {
                Ok(Reply::Search(envelope)) => {
                    leg.items = Projection::highlighted(&term).project_all(&envelope);
                    leg.took = envelope.took();
                    leg.total = envelope.total();
                }
                Ok(_) => {}
                Err(failure) => {
                    alert = Some(Notification::error(format!(
                        "{}: {}",
                        SEARCH_ERROR,
                        failure_message(&failure)
                    )));
                }
            }
        }
        if alert.is_some() {
            self.status_mut(page).alert = alert;
        }
    }

    fn apply_aggregations(&mut self, result: Result<Reply, CallFailure>) {
        let alert = match result {
            Ok(Reply::Search(envelope)) => {
                self.aggregation_took = envelope.took();
                self.aggregation_report = Some(report_from(&envelope));
                None
            }
            Ok(_) => None,
            Err(CallFailure::Backend(kind)) => Some(Notification::error(kind.catalog_alert())),
            Err(CallFailure::Transport(msg)) => Some(Notification::error(format!(
                "Error fetching aggregations: {}",
                msg
            ))),
        };
        self.finish(Page::Aggregations, alert);
    }

    fn apply_catalog_index(&mut self, result: Result<Reply, CallFailure>) {
        let action = self.catalog_action.unwrap_or(IndexAction::Create);
        let succeeded = matches!(&result, Ok(Reply::Ack(ack)) if ack.is_success());
        let alert = match (action, succeeded) {
            (IndexAction::Create, true) => Notification::success(CATALOG_INDEX_IN_PROGRESS),
            (IndexAction::Create, false) => Notification::error(CATALOG_INDEX_FAILED),
            (IndexAction::Delete, true) => Notification::success(CATALOG_INDEX_DELETED),
            (IndexAction::Delete, false) => Notification::error(CATALOG_INDEX_DELETE_FAILED),
        };
        self.finish(Page::IndexCatalog, Some(alert));
    }

    fn apply_vector_index(&mut self, result: Result<Reply, CallFailure>) {
        let action = self.vector_action.unwrap_or(IndexAction::Create);
        let alert = match (action, result) {
            (IndexAction::Create, Ok(Reply::Ack(ack))) if ack.is_success() => {
                Notification::success(VECTOR_INDEX_CREATED)
            }
            (IndexAction::Create, Ok(reply)) => Notification::error(
                ack_message(&reply).unwrap_or_else(|| VECTOR_INDEX_FAILED.to_string()),
            ),
            (IndexAction::Create, Err(CallFailure::Backend(kind))) => Notification::error(format!(
                "{}: {}",
                VECTOR_INDEX_FAILED,
                kind_message(&kind)
            )),
            (IndexAction::Create, Err(CallFailure::Transport(msg))) => {
                Notification::error(format!("Error during indexing: {}", msg))
            }
            (IndexAction::Delete, Ok(Reply::Ack(ack))) if ack.is_success() => {
                Notification::success(VECTOR_INDEX_DELETED)
            }
            (IndexAction::Delete, Ok(reply)) => Notification::error(format!(
                "{}: {}",
                VECTOR_INDEX_DELETE_FAILED,
                ack_message(&reply).unwrap_or_default()
            )),
            (IndexAction::Delete, Err(failure)) => Notification::error(format!(
                "{}: {}",
                VECTOR_INDEX_DELETE_FAILED,
                failure_message(&failure)
            )),
        };
        self.finish(Page::VectorIndex, Some(alert));
    }

    fn apply_upload(&mut self, result: Result<Reply, CallFailure>) {
        let alert = match result {
            Ok(_) => {
                self.upload_form = ProductForm::default();
                self.status_mut(Page::Upload).focus = 0;
                Notification::success(UPLOAD_SUCCEEDED)
            }
            Err(_) => Notification::error(UPLOAD_FAILED),
        };
        self.finish(Page::Upload, Some(alert));
    }
}

fn report_from(envelope: &SearchEnvelope) -> AggregationReport {
    envelope
        .result
        .aggregations
        .as_ref()
        .map(AggregationReport::from_value)
        .unwrap_or_default()
}

fn failure_policy(page: Page) -> FailurePolicy {
    match page {
        Page::Match => FailurePolicy {
            catalog_only: false,
            prefix: "Error fetching search results",
        },
        Page::MultiMatch => FailurePolicy {
            catalog_only: false,
            prefix: SEARCH_ERROR,
        },
        Page::Wildcard => FailurePolicy {
            catalog_only: true,
            prefix: "Error fetching wildcard search",
        },
        _ => FailurePolicy {
            catalog_only: true,
            prefix: SEARCH_ERROR,
        },
    }
}

fn search_failure_alert(policy: FailurePolicy, failure: &CallFailure) -> Notification {
    match failure {
        CallFailure::Backend(kind) if policy.catalog_only => {
            Notification::error(kind.catalog_alert())
        }
        CallFailure::Backend(kind) => Notification::error(kind.alert_with_prefix(policy.prefix)),
        CallFailure::Transport(msg) => Notification::error(format!("{}: {}", policy.prefix, msg)),
    }
}

fn projection_for(page: Page, term: &str) -> Projection<'_> {
    match page {
        Page::Match => Projection::cents(),
        Page::MultiMatch | Page::Fuzzy | Page::Complex => Projection::highlighted(term),
        _ => Projection::plain(),
    }
}

fn kind_message(kind: &FailureKind) -> String {
    match kind {
        FailureKind::IndexNotFound => INDEX_NOT_FOUND_ALERT.to_string(),
        FailureKind::Backend { status, message } if message.is_empty() => status.to_string(),
        FailureKind::Backend { message, .. } => message.clone(),
    }
}

fn failure_message(failure: &CallFailure) -> String {
    match failure {
        CallFailure::Backend(kind) => kind_message(kind),
        CallFailure::Transport(msg) => msg.clone(),
    }
}

fn ack_message(reply: &Reply) -> Option<String> {
    match reply {
        Reply::Ack(AckEnvelope { error_message, .. }) => error_message.clone(),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod prop_tests {
    use super::tests::base_config;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Only the most recent of any number of submissions is applied.
        #[test]
        fn prop_only_latest_submission_applies(count in 1usize..8) {
            let mut app = App::new(base_config());
            app.switch_to(Page::Aggregations);
            let dispatches: Vec<Dispatch> =
                (0..count).flat_map(|_| app.handle_action(Action::Submit)).collect();
            let applied: Vec<bool> = dispatches
                .iter()
                .map(|d| {
                    app.apply(Outcome {
                        page: d.page,
                        target: d.target,
                        ticket: d.ticket,
                        result: Err(CallFailure::Transport("x".to_string())),
                    })
                })
                .collect();
            prop_assert_eq!(applied.iter().filter(|a| **a).count(), 1);
            prop_assert!(applied[count - 1]);
        }

        #[test]
        fn prop_page_switching_never_leaves_editing(steps in prop::collection::vec(0usize..4, 0..20)) {
            let mut app = App::new(base_config());
            for step in steps {
                let action = match step {
                    0 => Action::NextPage,
                    1 => Action::PrevPage,
                    2 => Action::StartEdit,
                    _ => Action::MoveDown,
                };
                app.handle_action(action);
                if matches!(action, Action::NextPage | Action::PrevPage) {
                    prop_assert_eq!(app.mode, InputMode::Normal);
                }
            }
        }
    }
}
