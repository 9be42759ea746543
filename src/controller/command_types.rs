#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Library,
    ChapterMenu,
    Reading,
    SearchPrompt,
    SearchResults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Paging
    NextPage,
    PrevPage,

    // Chapter menu
    ShowChapters,
    Read,
    SelectNextChapter,
    SelectPrevChapter,

    // Search
    StartSearch,

    // Line editing for numbers and queries
    Digit(char),
    InsertChar(char),
    DeleteChar,
    Confirm,
    Cancel,

    // Session
    Back,
    Quit,
}
