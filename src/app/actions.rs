#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,

    ListUp,
    ListDown,
    GoTop,
    GoBottom,

    /// Play the selected track
    Activate,
    Stop,
    VolumeUp,
    VolumeDown,

    ToggleHelp,
    Resize,
}
