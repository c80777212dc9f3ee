use crossterm::event::KeyCode;
use interview_shell_engine::{Discovery, Pattern, Route, Session, ShellView};
use ratatui::widgets::ListState;

pub struct App {
    patterns: Vec<Pattern>,
    skipped: usize,
    list_state: ListState,
    /// Index into `patterns` of the launched pattern and its session.
    active: Option<(usize, Session)>,
    should_quit: bool,
}

impl App {
    pub fn new(discovery: Discovery) -> Self {
        let mut list_state = ListState::default();
        if !discovery.patterns.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            patterns: discovery.patterns,
            skipped: discovery.skipped.len(),
            list_state,
            active: None,
            should_quit: false,
        }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list_state
    }

    pub fn selected(&self) -> Option<&Pattern> {
        self.list_state
            .selected()
            .and_then(|index| self.patterns.get(index))
    }

    /// The launched pattern, or `None` while on the dashboard.
    pub fn active(&self) -> Option<(&Pattern, &Session)> {
        let (index, session) = self.active.as_ref()?;
        self.patterns.get(*index).map(|pattern| (pattern, session))
    }

    pub fn route(&self) -> Route {
        self.active()
            .map(|(pattern, _)| Route::for_pattern(pattern))
            .unwrap_or_default()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Jumps to `route`. Unknown ids leave the app on the dashboard.
    pub fn open_route(&mut self, route: &Route) -> bool {
        let index = route
            .resolve(&self.patterns)
            .and_then(|found| self.patterns.iter().position(|p| p.id == found.id));
        match index {
            Some(index) => {
                self.list_state.select(Some(index));
                self.launch(index);
                true
            }
            None => {
                self.active = None;
                false
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        if code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.active.is_some() {
            self.handle_shell_key(code);
        } else {
            self.handle_dashboard_key(code);
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Down | KeyCode::Char('j') => self.next_pattern(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_pattern(),
            KeyCode::Enter => {
                if let Some(index) = self.list_state.selected() {
                    self.launch(index);
                }
            }
            _ => {}
        }
    }

    fn handle_shell_key(&mut self, code: KeyCode) {
        let Some((index, session)) = self.active.as_mut() else {
            return;
        };
        let Some(pattern) = self.patterns.get(*index) else {
            self.active = None;
            return;
        };
        let in_instructions = session.view() == ShellView::Instructions;

        match code {
            KeyCode::Right | KeyCode::Char('l') if in_instructions => session.pager_mut().next(),
            KeyCode::Left | KeyCode::Char('h') if in_instructions => {
                session.pager_mut().previous()
            }
            KeyCode::Char(c @ '1'..='9') if in_instructions => {
                if let Some(digit) = c.to_digit(10) {
                    session.pager_mut().go_to(digit as usize - 1);
                }
            }
            KeyCode::Char('i') => {
                if !session.open_instructions() {
                    log::debug!("{} has no instructions", pattern.id);
                }
            }
            KeyCode::Esc if in_instructions => session.close_instructions(pattern),
            KeyCode::Esc | KeyCode::Char('b') => self.active = None,
            _ => {}
        }
    }

    fn launch(&mut self, index: usize) {
        let Some(pattern) = self.patterns.get(index) else {
            return;
        };
        log::info!("Launching {}", Route::for_pattern(pattern).fragment());
        self.active = Some((index, Session::launch(pattern)));
    }

    fn next_pattern(&mut self) {
        if self.patterns.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.patterns.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous_pattern(&mut self) {
        if self.patterns.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.patterns.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }
}
