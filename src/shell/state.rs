/// Where the interactive session currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellState {
    AwaitingCredential,
    Ready,
    Reading,
    Help,
    Answering(String),
    Terminated,
}

/// Something that happened while in a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    CredentialAcquired,
    CredentialDeclined,
    BannerShown,
    Line(String),
    HelpShown,
    Answered,
    Failed(String),
    Interrupted,
    EndOfInput,
}

const QUIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];

impl ShellState {
    pub fn next(&self, event: ShellEvent) -> ShellState {
        use ShellEvent as E;
        use ShellState as S;

        match (self, event) {
            (S::Terminated, _) => S::Terminated,
            (_, E::Interrupted) => S::Terminated,

            (S::AwaitingCredential, E::CredentialAcquired) => S::Ready,
            (S::AwaitingCredential, E::CredentialDeclined) => S::Terminated,

            (S::Ready, E::BannerShown) => S::Reading,

            (S::Reading, E::Line(line)) => Self::dispatch(&line),
            (S::Reading, E::Failed(_)) => S::Reading,
            (S::Reading, E::EndOfInput) => S::Terminated,

            (S::Help, E::HelpShown) => S::Reading,

            (S::Answering(_), E::Answered) | (S::Answering(_), E::Failed(_)) => S::Reading,

            (state, _) => state.clone(),
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, ShellState::Terminated)
    }

    fn dispatch(line: &str) -> ShellState {
        let input = line.trim();
        if input.is_empty() {
            return ShellState::Reading;
        }

        let lowered = input.to_lowercase();
        if QUIT_COMMANDS.contains(&lowered.as_str()) {
            ShellState::Terminated
        } else if lowered == "help" {
            ShellState::Help
        } else {
            ShellState::Answering(input.to_string())
        }
    }
}
