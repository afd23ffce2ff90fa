mod view;

pub use view::TerminalView;
