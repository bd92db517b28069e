use std::time::Duration;

use api_types::{
    auth::RegisterRequest,
    goal::{GoalCreate, GoalQuery},
    transaction::{TransactionCreate, TransactionKind, TransactionQuery, TransactionUpdate},
    user::UserUpdate,
};
use crossterm::event::{self, Event, KeyEvent};
use store::{Amount, OpPhase, Store};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
    validate,
};

/// Client-side page size of the transaction list (over the fetched window).
pub const PAGE_SIZE: usize = 5;
/// How many transactions one fetch pulls for the dashboard overview.
const FETCH_LIMIT: u32 = 100;
const GOALS_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Goals,
    Profile,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Goals => "Goals",
            Self::Profile => "Profile",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Dashboard => Self::Goals,
            Self::Goals => Self::Profile,
            Self::Profile => Self::Dashboard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
    Username,
}

#[derive(Debug)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub username: String,
    pub register: bool,
    pub focus: LoginField,
    pub message: Option<String>,
}

impl LoginState {
    fn field_mut(&mut self, field: LoginField) -> &mut String {
        match field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
            LoginField::Username => &mut self.username,
        }
    }

    fn advance_focus(&mut self, forward: bool) {
        // Username only exists in register mode.
        let order: &[LoginField] = if self.register {
            &[LoginField::Username, LoginField::Email, LoginField::Password]
        } else {
            &[LoginField::Email, LoginField::Password]
        };
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % order.len()
        } else {
            (pos + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxField {
    Amount,
    Category,
    Currency,
}

#[derive(Debug, Default)]
pub struct TxForm {
    pub amount: String,
    pub category: String,
    pub currency: String,
    pub focus: Option<TxField>,
    pub message: Option<String>,
}

impl TxForm {
    fn open(amount: String, category: String, currency: String) -> Self {
        Self {
            amount,
            category,
            currency,
            focus: Some(TxField::Amount),
            message: None,
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus.unwrap_or(TxField::Amount) {
            TxField::Amount => &mut self.amount,
            TxField::Category => &mut self.category,
            TxField::Currency => &mut self.currency,
        }
    }

    fn advance_focus(&mut self, forward: bool) {
        const ORDER: [TxField; 3] = [TxField::Amount, TxField::Category, TxField::Currency];
        let pos = self
            .focus
            .and_then(|f| ORDER.iter().position(|o| *o == f))
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % ORDER.len()
        } else {
            (pos + ORDER.len() - 1) % ORDER.len()
        };
        self.focus = Some(ORDER[next]);
    }

    /// Income when the amount field starts with `+`; drives the category
    /// suggestions shown under the form.
    pub fn kind_hint(&self) -> TransactionKind {
        if self.amount.trim_start().starts_with('+') {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardMode {
    List,
    Add,
    Edit,
    ConfirmDelete,
}

#[derive(Debug)]
pub struct DashboardState {
    pub mode: DashboardMode,
    pub selected: usize,
    pub form: TxForm,
    pub editing_id: Option<i64>,
    pub pending_delete: Option<(i64, String)>,
}

impl DashboardState {
    /// The page is derived from the selection, so paging and selection can
    /// never disagree.
    pub fn page(&self) -> usize {
        self.selected / PAGE_SIZE
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            mode: DashboardMode::List,
            selected: 0,
            form: TxForm::default(),
            editing_id: None,
            pending_delete: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GoalField {
    #[default]
    Name,
    Target,
}

#[derive(Debug, Default)]
pub struct GoalForm {
    pub name: String,
    pub target: String,
    pub focus: GoalField,
    pub message: Option<String>,
}

impl GoalForm {
    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            GoalField::Name => &mut self.name,
            GoalField::Target => &mut self.target,
        }
    }

    fn advance_focus(&mut self) {
        self.focus = match self.focus {
            GoalField::Name => GoalField::Target,
            GoalField::Target => GoalField::Name,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalsMode {
    List,
    Add,
    Fund,
    ConfirmDelete,
}

#[derive(Debug)]
pub struct GoalsState {
    pub mode: GoalsMode,
    pub selected: usize,
    pub form: GoalForm,
    pub fund_amount: String,
    pub fund_message: Option<String>,
    pub fund_goal: Option<(i64, String)>,
    pub pending_delete: Option<(i64, String)>,
}

impl Default for GoalsState {
    fn default() -> Self {
        Self {
            mode: GoalsMode::List,
            selected: 0,
            form: GoalForm::default(),
            fund_amount: String::new(),
            fund_message: None,
            fund_goal: None,
            pending_delete: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Username,
    Email,
    Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileMode {
    View,
    Edit,
}

#[derive(Debug)]
pub struct ProfileState {
    pub mode: ProfileMode,
    pub username: String,
    pub email: String,
    pub currency: String,
    pub focus: ProfileField,
    pub message: Option<String>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            mode: ProfileMode::View,
            username: String::new(),
            email: String::new(),
            currency: String::new(),
            focus: ProfileField::Username,
            message: None,
        }
    }
}

impl ProfileState {
    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            ProfileField::Username => &mut self.username,
            ProfileField::Email => &mut self.email,
            ProfileField::Currency => &mut self.currency,
        }
    }

    fn advance_focus(&mut self, forward: bool) {
        const ORDER: [ProfileField; 3] = [
            ProfileField::Username,
            ProfileField::Email,
            ProfileField::Currency,
        ];
        let pos = ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % ORDER.len()
        } else {
            (pos + ORDER.len() - 1) % ORDER.len()
        };
        self.focus = ORDER[next];
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub section: Section,
    pub login: LoginState,
    pub dashboard: DashboardState,
    pub goals: GoalsState,
    pub profile: ProfileState,
    pub timezone: chrono_tz::Tz,
}

pub struct App {
    config: AppConfig,
    pub store: Store,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let timezone = config.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(timezone = %config.timezone, "unknown timezone, falling back to UTC");
            chrono_tz::UTC
        });
        let store = Store::new(config.base_url.clone());
        let state = AppState {
            screen: Screen::Login,
            section: Section::Dashboard,
            login: LoginState {
                email: config.email.clone(),
                password: String::new(),
                username: String::new(),
                register: false,
                focus: LoginField::Email,
                message: None,
            },
            dashboard: DashboardState::default(),
            goals: GoalsState::default(),
            profile: ProfileState::default(),
            timezone,
        };

        Ok(Self {
            config,
            store,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state, &self.store))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = ui::keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        match self.state.screen {
            Screen::Login => self.handle_login_key(action).await,
            Screen::Main => self.handle_main_key(action).await,
        }

        Ok(())
    }

    // ---- login screen ----

    async fn handle_login_key(&mut self, action: AppAction) {
        match action {
            AppAction::ToggleRegister => {
                let login = &mut self.state.login;
                login.register = !login.register;
                login.message = None;
                if !login.register && login.focus == LoginField::Username {
                    login.focus = LoginField::Email;
                }
            }
            AppAction::NextField | AppAction::Down => self.state.login.advance_focus(true),
            AppAction::Up => self.state.login.advance_focus(false),
            AppAction::Backspace => {
                let focus = self.state.login.focus;
                self.state.login.field_mut(focus).pop();
            }
            AppAction::Input(ch) => {
                let focus = self.state.login.focus;
                self.state.login.field_mut(focus).push(ch);
            }
            AppAction::Submit => self.submit_auth().await,
            AppAction::Cancel => self.should_quit = true,
            _ => {}
        }
    }

    async fn submit_auth(&mut self) {
        let login = &self.state.login;
        let email = login.email.trim().to_lowercase();
        let username = login.username.trim().to_string();
        let password = login.password.clone();
        let register = login.register;

        let validation = if register {
            validate::username_error(&username)
                .or_else(|| validate::email_error(&email))
                .or_else(|| validate::password_error(&password))
        } else {
            validate::email_error(&email).or_else(|| validate::password_error(&password))
        };
        if let Some(message) = validation {
            self.state.login.message = Some(message.to_string());
            return;
        }

        if register {
            let payload = RegisterRequest {
                username,
                email,
                password,
                default_currency: None,
                timezone: Some(self.config.timezone.clone()),
            };
            self.store.register(payload).await;
        } else {
            self.store.login(email, password).await;
        }

        if self.store.auth.phase == OpPhase::Fulfilled {
            self.state.login.password.clear();
            self.state.login.message = None;
            self.state.screen = Screen::Main;
            self.state.section = Section::Dashboard;
            self.load_dashboard().await;
            self.load_goals().await;
        } else {
            self.state.login.message = self.store.auth.error.clone();
        }
    }

    // ---- shared main-screen plumbing ----

    async fn handle_main_key(&mut self, action: AppAction) {
        if !self.store.guard_session() {
            self.state.screen = Screen::Login;
            self.state.login.password.clear();
            self.state.login.message = Some("Session expired. Please sign in again.".to_string());
            self.state.dashboard = DashboardState::default();
            self.state.goals = GoalsState::default();
            self.state.profile = ProfileState::default();
            return;
        }

        match self.state.section {
            Section::Dashboard => self.handle_dashboard_key(action).await,
            Section::Goals => self.handle_goals_key(action).await,
            Section::Profile => self.handle_profile_key(action).await,
        }
    }

    fn next_section(&mut self) {
        self.state.section = self.state.section.next();
    }

    fn logout(&mut self) {
        self.store.logout();
        self.state.screen = Screen::Login;
        self.state.login.password.clear();
        self.state.login.message = None;
        self.state.dashboard = DashboardState::default();
        self.state.goals = GoalsState::default();
        self.state.profile = ProfileState::default();
    }

    async fn load_dashboard(&mut self) {
        self.store
            .fetch_transactions(TransactionQuery {
                limit: Some(FETCH_LIMIT),
                offset: None,
            })
            .await;
        self.clamp_dashboard_selection();
    }

    async fn load_goals(&mut self) {
        self.store
            .fetch_goals(GoalQuery {
                limit: Some(GOALS_LIMIT),
                ..GoalQuery::default()
            })
            .await;
        self.clamp_goals_selection();
    }

    fn clamp_dashboard_selection(&mut self) {
        let len = self.store.transactions.items.len();
        self.state.dashboard.selected = self.state.dashboard.selected.min(len.saturating_sub(1));
    }

    fn clamp_goals_selection(&mut self) {
        let len = self.store.goals.items.len();
        self.state.goals.selected = self.state.goals.selected.min(len.saturating_sub(1));
    }

    // ---- dashboard ----

    async fn handle_dashboard_key(&mut self, action: AppAction) {
        match self.state.dashboard.mode {
            DashboardMode::List => self.handle_dashboard_list_key(action).await,
            DashboardMode::Add | DashboardMode::Edit => {
                self.handle_dashboard_form_key(action).await;
            }
            DashboardMode::ConfirmDelete => self.handle_dashboard_confirm_key(action).await,
        }
    }

    async fn handle_dashboard_list_key(&mut self, action: AppAction) {
        let len = self.store.transactions.items.len();
        match action {
            AppAction::Up => {
                self.state.dashboard.selected = self.state.dashboard.selected.saturating_sub(1);
            }
            AppAction::Down => {
                if len > 0 {
                    self.state.dashboard.selected =
                        (self.state.dashboard.selected + 1).min(len - 1);
                }
            }
            AppAction::NextField => self.next_section(),
            AppAction::Input(ch) => match ch {
                'k' | 'K' => {
                    self.state.dashboard.selected = self.state.dashboard.selected.saturating_sub(1);
                }
                'j' | 'J' => {
                    if len > 0 {
                        self.state.dashboard.selected =
                            (self.state.dashboard.selected + 1).min(len - 1);
                    }
                }
                'p' | 'P' => {
                    self.state.dashboard.selected =
                        self.state.dashboard.selected.saturating_sub(PAGE_SIZE);
                }
                'n' | 'N' => {
                    if len > 0 {
                        self.state.dashboard.selected =
                            (self.state.dashboard.selected + PAGE_SIZE).min(len - 1);
                    }
                }
                'a' | 'A' => {
                    let currency = self
                        .store
                        .auth
                        .user
                        .as_ref()
                        .map(|u| u.default_currency.clone())
                        .unwrap_or_else(|| "USD".to_string());
                    self.state.dashboard.form = TxForm::open(String::new(), String::new(), currency);
                    self.state.dashboard.mode = DashboardMode::Add;
                    self.store.transactions.clear_error();
                }
                'e' | 'E' => {
                    let selected = self.state.dashboard.selected;
                    if let Some(tx) = self.store.transactions.items.get(selected) {
                        let sign = match tx.kind {
                            TransactionKind::Income => "+",
                            _ => "-",
                        };
                        let amount = format!("{sign}{}", Amount::from_wire(tx.amount).abs());
                        self.state.dashboard.form = TxForm::open(
                            amount,
                            tx.category_name.clone(),
                            tx.currency.clone().unwrap_or_default(),
                        );
                        self.state.dashboard.editing_id = Some(tx.id_);
                        self.state.dashboard.mode = DashboardMode::Edit;
                        self.store.transactions.clear_error();
                    }
                }
                'd' | 'D' => {
                    let selected = self.state.dashboard.selected;
                    if let Some(tx) = self.store.transactions.items.get(selected) {
                        self.state.dashboard.pending_delete =
                            Some((tx.id_, tx.category_name.clone()));
                        self.state.dashboard.mode = DashboardMode::ConfirmDelete;
                    }
                }
                'r' | 'R' => {
                    self.store.refresh_profile().await;
                    self.load_dashboard().await;
                }
                'l' | 'L' => self.logout(),
                'q' | 'Q' => self.should_quit = true,
                _ => {}
            },
            _ => {}
        }
    }

    async fn handle_dashboard_form_key(&mut self, action: AppAction) {
        match action {
            AppAction::NextField | AppAction::Down => {
                self.state.dashboard.form.advance_focus(true);
            }
            AppAction::Up => self.state.dashboard.form.advance_focus(false),
            AppAction::Backspace => {
                self.state.dashboard.form.field_mut().pop();
            }
            AppAction::Input(ch) => self.state.dashboard.form.field_mut().push(ch),
            AppAction::Submit => self.submit_transaction_form().await,
            AppAction::Cancel => {
                self.state.dashboard.mode = DashboardMode::List;
                self.state.dashboard.editing_id = None;
            }
            _ => {}
        }
    }

    async fn submit_transaction_form(&mut self) {
        let (kind, amount) =
            match validate::parse_signed_amount(&self.state.dashboard.form.amount) {
                Ok(parsed) => parsed,
                Err(message) => {
                    self.state.dashboard.form.message = Some(message.to_string());
                    return;
                }
            };
        let category = self.state.dashboard.form.category.trim().to_lowercase();
        if category.is_empty() {
            self.state.dashboard.form.message = Some("Category is required".to_string());
            return;
        }
        let currency = self
            .state
            .dashboard
            .form
            .currency
            .trim()
            .to_ascii_uppercase();
        let currency = if currency.is_empty() {
            None
        } else {
            Some(currency)
        };

        match self.state.dashboard.mode {
            DashboardMode::Add => {
                let payload = TransactionCreate {
                    amount: amount.to_wire(),
                    kind,
                    category_name: category,
                    currency,
                    date: None,
                };
                self.store.create_transaction(payload).await;
            }
            DashboardMode::Edit => {
                let Some(id) = self.state.dashboard.editing_id else {
                    self.state.dashboard.mode = DashboardMode::List;
                    return;
                };
                let payload = TransactionUpdate {
                    amount: Some(amount.to_wire()),
                    kind: Some(kind),
                    category_name: Some(category),
                    currency,
                    date: None,
                };
                self.store.update_transaction(id, payload).await;
            }
            _ => return,
        }

        if self.store.transactions.phase == OpPhase::Fulfilled {
            if self.state.dashboard.mode == DashboardMode::Add {
                // The created row is prepended; move the selection onto it.
                self.state.dashboard.selected = 0;
            }
            self.state.dashboard.mode = DashboardMode::List;
            self.state.dashboard.editing_id = None;
        } else {
            self.state.dashboard.form.message = self.store.transactions.error.clone();
        }
    }

    async fn handle_dashboard_confirm_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input('y') | AppAction::Input('Y') => {
                if let Some((id, _)) = self.state.dashboard.pending_delete.take() {
                    self.store.delete_transaction(id).await;
                    self.clamp_dashboard_selection();
                }
                self.state.dashboard.mode = DashboardMode::List;
            }
            AppAction::Input('n') | AppAction::Input('N') | AppAction::Cancel => {
                self.state.dashboard.pending_delete = None;
                self.state.dashboard.mode = DashboardMode::List;
            }
            _ => {}
        }
    }

    // ---- goals ----

    async fn handle_goals_key(&mut self, action: AppAction) {
        match self.state.goals.mode {
            GoalsMode::List => self.handle_goals_list_key(action).await,
            GoalsMode::Add => self.handle_goal_form_key(action).await,
            GoalsMode::Fund => self.handle_goal_fund_key(action).await,
            GoalsMode::ConfirmDelete => self.handle_goals_confirm_key(action).await,
        }
    }

    async fn handle_goals_list_key(&mut self, action: AppAction) {
        let len = self.store.goals.items.len();
        match action {
            AppAction::Up => {
                self.state.goals.selected = self.state.goals.selected.saturating_sub(1);
            }
            AppAction::Down => {
                if len > 0 {
                    self.state.goals.selected = (self.state.goals.selected + 1).min(len - 1);
                }
            }
            AppAction::NextField => self.next_section(),
            AppAction::Input(ch) => match ch {
                'k' | 'K' => {
                    self.state.goals.selected = self.state.goals.selected.saturating_sub(1);
                }
                'j' | 'J' => {
                    if len > 0 {
                        self.state.goals.selected = (self.state.goals.selected + 1).min(len - 1);
                    }
                }
                'a' | 'A' => {
                    self.state.goals.form = GoalForm::default();
                    self.state.goals.mode = GoalsMode::Add;
                    self.store.goals.clear_error();
                }
                'f' | 'F' => {
                    if let Some(goal) = self.store.goals.items.get(self.state.goals.selected) {
                        self.state.goals.fund_goal = Some((goal.id_, goal.name.clone()));
                        self.state.goals.fund_amount.clear();
                        self.state.goals.fund_message = None;
                        self.state.goals.mode = GoalsMode::Fund;
                        self.store.goals.clear_error();
                    }
                }
                'd' | 'D' => {
                    if let Some(goal) = self.store.goals.items.get(self.state.goals.selected) {
                        self.state.goals.pending_delete = Some((goal.id_, goal.name.clone()));
                        self.state.goals.mode = GoalsMode::ConfirmDelete;
                    }
                }
                'r' | 'R' => self.load_goals().await,
                'l' | 'L' => self.logout(),
                'q' | 'Q' => self.should_quit = true,
                _ => {}
            },
            _ => {}
        }
    }

    async fn handle_goal_form_key(&mut self, action: AppAction) {
        match action {
            AppAction::NextField | AppAction::Down | AppAction::Up => {
                self.state.goals.form.advance_focus();
            }
            AppAction::Backspace => {
                self.state.goals.form.field_mut().pop();
            }
            AppAction::Input(ch) => self.state.goals.form.field_mut().push(ch),
            AppAction::Submit => self.submit_goal_form().await,
            AppAction::Cancel => self.state.goals.mode = GoalsMode::List,
            _ => {}
        }
    }

    async fn submit_goal_form(&mut self) {
        let name = self.state.goals.form.name.trim().to_string();
        if name.is_empty() {
            self.state.goals.form.message = Some("Name is required".to_string());
            return;
        }
        let target: Amount = match self.state.goals.form.target.trim().parse() {
            Ok(target) => target,
            Err(_) => {
                self.state.goals.form.message = Some("Enter a valid target amount".to_string());
                return;
            }
        };
        if !target.is_positive() {
            self.state.goals.form.message =
                Some("Target must be greater than zero".to_string());
            return;
        }

        self.store
            .create_goal(GoalCreate {
                name,
                summ: target.to_wire(),
                saved: 0.0,
            })
            .await;

        if self.store.goals.phase == OpPhase::Fulfilled {
            self.state.goals.selected = 0;
            self.state.goals.mode = GoalsMode::List;
        } else {
            self.state.goals.form.message = self.store.goals.error.clone();
        }
    }

    async fn handle_goal_fund_key(&mut self, action: AppAction) {
        match action {
            AppAction::Backspace => {
                self.state.goals.fund_amount.pop();
            }
            AppAction::Input(ch) => self.state.goals.fund_amount.push(ch),
            AppAction::Submit => self.submit_fund().await,
            AppAction::Cancel => {
                self.state.goals.fund_goal = None;
                self.state.goals.mode = GoalsMode::List;
            }
            _ => {}
        }
    }

    async fn submit_fund(&mut self) {
        let Some((id, _)) = self.state.goals.fund_goal.clone() else {
            self.state.goals.mode = GoalsMode::List;
            return;
        };
        let amount: Amount = match self.state.goals.fund_amount.trim().parse() {
            Ok(amount) => amount,
            Err(_) => {
                self.state.goals.fund_message = Some("Enter a valid amount".to_string());
                return;
            }
        };
        if !amount.is_positive() {
            self.state.goals.fund_message = Some("Amount must be greater than zero".to_string());
            return;
        }

        self.store.fund_goal(id, amount).await;

        if self.store.goals.phase == OpPhase::Fulfilled {
            self.state.goals.fund_goal = None;
            self.state.goals.mode = GoalsMode::List;
        } else {
            self.state.goals.fund_message = self.store.goals.error.clone();
        }
    }

    async fn handle_goals_confirm_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input('y') | AppAction::Input('Y') => {
                if let Some((id, _)) = self.state.goals.pending_delete.take() {
                    self.store.delete_goal(id).await;
                    self.clamp_goals_selection();
                }
                self.state.goals.mode = GoalsMode::List;
            }
            AppAction::Input('n') | AppAction::Input('N') | AppAction::Cancel => {
                self.state.goals.pending_delete = None;
                self.state.goals.mode = GoalsMode::List;
            }
            _ => {}
        }
    }

    // ---- profile ----

    async fn handle_profile_key(&mut self, action: AppAction) {
        match self.state.profile.mode {
            ProfileMode::View => self.handle_profile_view_key(action).await,
            ProfileMode::Edit => self.handle_profile_edit_key(action).await,
        }
    }

    async fn handle_profile_view_key(&mut self, action: AppAction) {
        match action {
            AppAction::NextField => self.next_section(),
            AppAction::Input(ch) => match ch {
                'e' | 'E' => {
                    if let Some(user) = &self.store.auth.user {
                        self.state.profile.username = user.username.clone();
                        self.state.profile.email = user.email.clone();
                        self.state.profile.currency = user.default_currency.clone();
                        self.state.profile.focus = ProfileField::Username;
                        self.state.profile.message = None;
                        self.state.profile.mode = ProfileMode::Edit;
                        self.store.auth.clear_error();
                    }
                }
                'r' | 'R' => self.store.refresh_profile().await,
                'l' | 'L' => self.logout(),
                'q' | 'Q' => self.should_quit = true,
                _ => {}
            },
            _ => {}
        }
    }

    async fn handle_profile_edit_key(&mut self, action: AppAction) {
        match action {
            AppAction::NextField | AppAction::Down => self.state.profile.advance_focus(true),
            AppAction::Up => self.state.profile.advance_focus(false),
            AppAction::Backspace => {
                self.state.profile.field_mut().pop();
            }
            AppAction::Input(ch) => self.state.profile.field_mut().push(ch),
            AppAction::Submit => self.submit_profile().await,
            AppAction::Cancel => self.state.profile.mode = ProfileMode::View,
            _ => {}
        }
    }

    async fn submit_profile(&mut self) {
        let username = self.state.profile.username.trim().to_string();
        let email = self.state.profile.email.trim().to_lowercase();
        let currency = self.state.profile.currency.trim().to_ascii_uppercase();

        let validation = validate::username_error(&username)
            .or_else(|| validate::email_error(&email));
        if let Some(message) = validation {
            self.state.profile.message = Some(message.to_string());
            return;
        }
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            self.state.profile.message = Some("Enter a 3-letter currency code".to_string());
            return;
        }

        self.store
            .update_profile(UserUpdate {
                username: Some(username),
                email: Some(email),
                default_currency: Some(currency),
                timezone: None,
            })
            .await;

        if self.store.auth.phase == OpPhase::Fulfilled {
            self.state.profile.mode = ProfileMode::View;
            self.state.profile.message = None;
        } else {
            self.state.profile.message = self.store.auth.error.clone();
        }
    }
}
