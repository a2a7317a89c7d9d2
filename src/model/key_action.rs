//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Printable characters that are not bound go to the search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Result list navigation
    /// Move selection up one row. Default: ↑
    SelectUp,
    /// Move selection down one row. Default: ↓
    SelectDown,
    /// Move selection up one page. Default: Page Up
    PageUp,
    /// Move selection down one page. Default: Page Down
    PageDown,
    /// Jump to the first result. Default: Ctrl+Home
    SelectFirst,
    /// Jump to the last loaded result. Default: Ctrl+End
    SelectLast,

    // Search input editing
    /// Move cursor left. Default: ←
    CursorLeft,
    /// Move cursor right. Default: →
    CursorRight,
    /// Move cursor to start of input. Default: Home
    CursorHome,
    /// Move cursor to end of input. Default: End
    CursorEnd,
    /// Delete character before cursor. Default: Backspace
    Backspace,
    /// Delete character under cursor. Default: Delete
    DeleteForward,
    /// Clear the search input. Default: Ctrl+u
    ClearSearch,

    // Query control
    /// Re-fetch page 1 immediately. Default: F5 / Ctrl+r
    Refresh,
    /// Cycle the sort order. Default: F3 / Ctrl+s
    CycleSort,
    /// Open the filter panel. Default: F2 / Ctrl+f
    OpenFilters,

    // Cart
    /// Add the selected product to the cart. Default: Enter / Ctrl+a
    AddToCart,
    /// Show or hide the cart panel. Default: F4 / Ctrl+t
    ToggleCart,
    /// Remove the selected product's line from the cart. Default: Ctrl+x
    RemoveFromCart,
    /// Place an order for the cart contents. Default: Ctrl+o
    PlaceOrder,

    // Application
    /// Close the open panel, or quit when none is open. Default: Esc
    Back,
    /// Quit immediately. Default: Ctrl+c / Ctrl+q
    Quit,
}
