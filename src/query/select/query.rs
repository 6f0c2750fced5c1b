use futures::{future::try_join_all, try_join};
use log::{debug, trace};

use crate::{
    item::{Choice, Prompt},
    query::{Key, KeySource},
    style::{has_color, Style},
    term::Terminal,
    util::{join_nonempty, rows},
    Error, Result,
};

use super::{ListHandler, Selected};

const MULTIPLE_HINT: &str = "(Use <space> to select, <return> to submit)";

/// Options fixed for the lifetime of one prompt.
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    /// Allow selecting several choices.
    pub multiple: bool,
    /// Show the focus pointer in multiple-choice mode too.
    pub pointer: bool,
    /// Placeholder shown next to the prompt until it is submitted.
    pub hint: Option<String>,
    pub header: Option<String>,
    pub footer: Option<String>,
}

/// State of a prompt that changes on every keypress.
#[derive(Debug, Clone, Default)]
pub struct PromptState {
    pub submitted: bool,
    pub cancelled: bool,
    pub hint: String,
    pub error: Option<String>,
}

/// A frame as it was written to the terminal.
///
/// The next render erases exactly `size` rows before writing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// The composed prompt line, without the summary or help text.
    pub prompt: String,
    pub text: String,
    /// Terminal rows `text` occupies.
    pub size: usize,
}

/// Where a prompt is after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Submitted,
    Cancelled,
}

/// The value a select prompt resolves with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    One(String),
    Many(Vec<String>),
}

impl Answer {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(name) => vec![name],
            Self::Many(names) => names,
        }
    }

    pub fn as_one(&self) -> Option<&str> {
        match self {
            Self::One(name) => Some(name),
            Self::Many(_) => None,
        }
    }
}

/// Keys with a meaning only in multiple-choice mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MultiAction {
    ToggleAll,
    Invert,
}

impl MultiAction {
    fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char('a') => Some(Self::ToggleAll),
            Key::Char('i') => Some(Self::Invert),
            _ => None,
        }
    }
}

type ChoiceHook<'a> = Box<dyn Fn(&Choice, usize) + 'a>;

/// A prompt asking to pick one or more choices from a list.
///
/// Every handled key is followed by a full repaint: the previous frame is
/// erased and the new one written in its place.
pub struct SelectQuery<'a, S> {
    prompt: Prompt,
    style: &'a S,
    handler: ListHandler,
    options: SelectOptions,
    state: PromptState,
    frame: Frame,
    on_choice: Option<ChoiceHook<'a>>,
}

impl<'a, S: Style> SelectQuery<'a, S> {
    pub fn new(prompt: Prompt, style: &'a S, handler: ListHandler) -> Self {
        Self {
            prompt,
            style,
            handler,
            options: SelectOptions::default(),
            state: PromptState::default(),
            frame: Frame::default(),
            on_choice: None,
        }
    }

    /// Switches to multiple-choice mode.
    pub fn many(mut self) -> Self {
        self.options.multiple = true;
        if self.options.hint.is_none() {
            self.state.hint = MULTIPLE_HINT.to_string();
        }
        self
    }

    pub fn with_pointer(mut self, pointer: bool) -> Self {
        self.options.pointer = pointer;
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into();
        self.state.hint = hint.clone();
        self.options.hint = Some(hint);
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.options.header = Some(header.into());
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.options.footer = Some(footer.into());
        self
    }

    /// Limits how many choices are shown at once.
    pub fn with_rows(self, rows: usize) -> Self {
        Self {
            handler: self.handler.with_rows(rows),
            ..self
        }
    }

    /// Focuses the choice at `index` when the prompt starts.
    pub fn with_initial(self, index: usize) -> Self {
        Self {
            handler: self.handler.with_cursor(index),
            ..self
        }
    }

    /// Registers a hook called for each choice right before it is rendered.
    pub fn on_choice(mut self, hook: impl Fn(&Choice, usize) + 'a) -> Self {
        self.on_choice = Some(Box::new(hook));
        self
    }

    pub fn options(&self) -> &SelectOptions {
        &self.options
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    pub fn handler(&self) -> &ListHandler {
        &self.handler
    }

    /// The last frame written to the terminal.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Runs the prompt until it is submitted or cancelled.
    ///
    /// The terminal is released on every exit path, including a failed
    /// render. Cancellation is reported as [`Error::Cancelled`].
    pub async fn run(
        &mut self,
        keys: &mut impl KeySource,
        term: &mut impl Terminal,
    ) -> Result<Answer> {
        term.begin()?;
        let result = self.interact(keys, term).await;
        match (result, term.end()) {
            (Ok(answer), ended) => {
                ended?;
                Ok(answer)
            }
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(ended)) => {
                debug!("failed to release terminal after {}: {}", e, ended);
                Err(e)
            }
        }
    }

    async fn interact(
        &mut self,
        keys: &mut impl KeySource,
        term: &mut impl Terminal,
    ) -> Result<Answer> {
        self.render(term).await?;
        loop {
            let key = keys.read_key()?;
            match self.keypress(key, term).await? {
                Status::Active => {}
                Status::Submitted => return Ok(self.answer()),
                Status::Cancelled => return Err(Error::Cancelled),
            }
        }
    }

    /// Handles one key and repaints.
    ///
    /// Once submitted or cancelled the prompt ignores further keys.
    pub async fn keypress(&mut self, key: Key, term: &mut impl Terminal) -> Result<Status> {
        if self.state.cancelled {
            return Ok(Status::Cancelled);
        }
        if self.state.submitted {
            return Ok(Status::Submitted);
        }
        trace!("keypress {:?}", key);
        self.state.error = None;

        match key {
            Key::Enter => return self.submit(term).await,
            Key::Escape | Key::Interrupt => return self.cancel(term).await,
            Key::Space => {
                if !(self.options.multiple && self.handler.toggle()) {
                    term.alert()?;
                }
            }
            Key::Up | Key::Down | Key::Home | Key::End | Key::PageUp | Key::PageDown => {
                if !self.handler.on_key(key) {
                    term.alert()?;
                }
            }
            _ => self.dispatch(key, term)?,
        }

        self.render(term).await?;
        Ok(Status::Active)
    }

    /// Routes a key the list does not handle by itself.
    ///
    /// In multiple-choice mode `a` toggles all and `i` inverts the
    /// selection, other keys go to the list. Single-choice mode has no
    /// such keys and alerts.
    pub fn dispatch(&mut self, key: Key, term: &mut impl Terminal) -> Result<()> {
        if self.options.multiple {
            let handled = match MultiAction::from_key(key) {
                Some(MultiAction::ToggleAll) => self.handler.toggle_all(),
                Some(MultiAction::Invert) => self.handler.invert(),
                None => self.handler.dispatch(key),
            };
            if handled {
                return Ok(());
            }
        }
        debug!("no action for {:?}", key);
        term.alert()?;
        Ok(())
    }

    async fn submit(&mut self, term: &mut impl Terminal) -> Result<Status> {
        if !self.options.multiple {
            let refusal = match self.handler.focused() {
                None => Some(None),
                Some(choice) if choice.disabled => Some(Some("This choice is disabled")),
                Some(_) => None,
            };
            if let Some(error) = refusal {
                term.alert()?;
                self.state.error = error.map(str::to_string);
                self.render(term).await?;
                return Ok(Status::Active);
            }
        }

        self.state.submitted = true;
        self.render(term).await?;
        debug!("submitted {:?}", self.handler.get_result(self.options.multiple));
        Ok(Status::Submitted)
    }

    async fn cancel(&mut self, term: &mut impl Terminal) -> Result<Status> {
        self.state.cancelled = true;
        self.state.submitted = true;
        self.render(term).await?;
        debug!("cancelled");
        Ok(Status::Cancelled)
    }

    /// The current selection as an answer.
    pub fn answer(&self) -> Answer {
        let mut names = self.handler.get_result(self.options.multiple);
        if self.options.multiple {
            Answer::Many(names)
        } else {
            Answer::One(names.pop().unwrap_or_default())
        }
    }

    pub fn indicator(&self, choice: &Choice) -> String {
        if self.options.multiple {
            self.handler.indicator(self.style, choice)
        } else {
            String::new()
        }
    }

    pub fn pointer(&self, focused: bool) -> String {
        if !self.options.multiple || self.options.pointer {
            self.handler.pointer(self.style, focused)
        } else {
            String::new()
        }
    }

    async fn resolve_hint(&self, choice: &Choice, index: usize) -> Result<String> {
        match &choice.hint {
            Some(hint) => hint.resolve(choice, index).await,
            None => Ok(String::new()),
        }
    }

    /// Renders the line of a visible choice at `index`.
    pub async fn render_choice(&self, choice: &Choice, index: usize) -> Result<String> {
        if let Some(hook) = &self.on_choice {
            hook(choice, index);
        }

        let focused = self.handler.index() == index;
        let pointer = self.pointer(focused);
        let indicator = self.indicator(choice) + &choice.pad;
        let (mut message, mut hint) = try_join!(
            choice.message.resolve(choice, index),
            self.resolve_hint(choice, index)
        )?;

        if !hint.is_empty() && !has_color(&hint) {
            hint = self.style.muted(&hint);
        }

        if choice.disabled {
            message = self.style.disabled(&message);
        } else if focused {
            message = self.style.heading(&message);
        }

        let lead = format!("{}{}{}", choice.indent, pointer, indicator);
        Ok(join_nonempty(&[lead, message, hint], " "))
    }

    /// Renders every visible choice, one per line, in list order.
    pub async fn render_choices(&self) -> Result<String> {
        if self.state.submitted {
            return Ok(String::new());
        }
        let lines = try_join_all(
            self.handler
                .visible()
                .iter()
                .enumerate()
                .map(|(index, choice)| self.render_choice(choice, index)),
        )
        .await?;
        if lines.is_empty() {
            return Ok(self.style.danger("No matching choices"));
        }
        Ok(lines.join("\n"))
    }

    /// The summary shown after the prompt message.
    ///
    /// Before submission this is the hint, afterwards the selected names.
    pub fn format(&self) -> String {
        if self.state.cancelled {
            return String::new();
        }
        if !self.state.submitted {
            return self.style.muted(&self.state.hint);
        }
        match self.handler.selected(self.options.multiple) {
            Selected::Many(choices) => choices
                .iter()
                .map(|choice| self.style.primary(&choice.name))
                .collect::<Vec<_>>()
                .join(", "),
            Selected::One(choice) => choice
                .map(|choice| self.style.primary(&choice.name))
                .unwrap_or_default(),
        }
    }

    pub fn prefix(&self) -> String {
        if self.state.cancelled {
            self.style.danger("✖")
        } else if self.state.submitted {
            self.style.success("✔")
        } else {
            self.style.primary("?")
        }
    }

    pub fn separator(&self) -> String {
        if self.state.submitted {
            self.style.muted("·")
        } else {
            self.style.muted("›")
        }
    }

    pub fn message(&self) -> String {
        self.style.strong(&self.prompt.0)
    }

    pub fn header(&self) -> String {
        self.options.header.clone().unwrap_or_default()
    }

    pub fn footer(&self) -> String {
        self.options.footer.clone().unwrap_or_default()
    }

    pub fn error(&self) -> String {
        self.state
            .error
            .as_deref()
            .map(|error| self.style.danger(error))
            .unwrap_or_default()
    }

    /// The placeholder hint. Empty once the prompt is submitted.
    pub fn hint(&self) -> String {
        if self.state.submitted {
            return String::new();
        }
        self.style.muted(&self.state.hint)
    }

    /// Composes the next frame for a terminal `columns` wide.
    pub async fn compose(&self, columns: usize) -> Result<Frame> {
        let submitted = self.state.submitted;

        let mut prompt = join_nonempty(&[self.prefix(), self.message(), self.separator()], " ");
        let line = prompt.clone();

        let header = self.header();
        let output = self.format();
        let help = match self.error() {
            error if error.is_empty() => self.hint(),
            error => error,
        };
        let body = self.render_choices().await?;
        let footer = self.footer();

        if !output.is_empty() || help.is_empty() {
            prompt.push(' ');
            prompt.push_str(&output);
        }
        if !help.is_empty() && !prompt.contains(&help) {
            prompt.push(' ');
            prompt.push_str(&help);
        }
        if submitted
            && !self.state.cancelled
            && self.options.multiple
            && output.is_empty()
            && body.is_empty()
        {
            if !prompt.ends_with(' ') {
                prompt.push(' ');
            }
            prompt.push_str(&self.style.danger("No items were selected"));
        }

        let text = join_nonempty(&[header, prompt, body, footer], "\n");
        Ok(Frame {
            prompt: line,
            size: rows(&text, columns),
            text,
        })
    }

    /// Replaces the previous frame on the terminal with a new one.
    pub async fn render(&mut self, term: &mut impl Terminal) -> Result<()> {
        let next = self.compose(term.columns()).await?;
        paint(term, &self.frame, &next)?;
        trace!("frame of {} rows replaced {} rows", next.size, self.frame.size);
        self.frame = next;
        Ok(())
    }
}

fn paint(term: &mut impl Terminal, previous: &Frame, next: &Frame) -> Result<()> {
    term.clear(previous.size)?;
    term.write(&next.text)?;
    term.restore()?;
    Ok(())
}
