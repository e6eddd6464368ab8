#![forbid(unsafe_code)]

//! The static application catalog.
//!
//! Five host applications, each with nine console buttons, an accent color,
//! and a dial label. Loaded once, immutable for the process lifetime.

/// Number of console buttons per application (fixed 3×3 grid).
pub const BUTTONS_PER_APP: usize = 9;

/// Identifier for one of the five host applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppId {
    VsCode,
    Chrome,
    Figma,
    Slack,
    Excel,
}

impl AppId {
    /// All applications in switcher order. `ALL[0]` is the default app.
    pub const ALL: [Self; 5] = [
        Self::VsCode,
        Self::Chrome,
        Self::Figma,
        Self::Slack,
        Self::Excel,
    ];

    /// Stable string id, used as the output-table key prefix.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VsCode => "vscode",
            Self::Chrome => "chrome",
            Self::Figma => "figma",
            Self::Slack => "slack",
            Self::Excel => "excel",
        }
    }

    /// Full specification for this application.
    pub fn spec(self) -> &'static AppSpec {
        &APPS[self as usize]
    }
}

/// One of the nine fixed console actions for an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSpec {
    /// Short glyph shown on the button face.
    pub icon: &'static str,
    /// Action name.
    pub label: &'static str,
    /// One-line description shown when the button is selected.
    pub description: &'static str,
}

/// Static configuration for one host application.
#[derive(Debug, Clone, Copy)]
pub struct AppSpec {
    pub id: AppId,
    pub name: &'static str,
    /// Switcher glyph.
    pub icon: &'static str,
    /// Accent color as RGB.
    pub accent: (u8, u8, u8),
    /// What the dial controls in this application.
    pub dial_label: &'static str,
    pub buttons: [ButtonSpec; BUTTONS_PER_APP],
}

const fn button(
    icon: &'static str,
    label: &'static str,
    description: &'static str,
) -> ButtonSpec {
    ButtonSpec {
        icon,
        label,
        description,
    }
}

/// The catalog, in switcher order. Indexed by `AppId as usize`.
pub static APPS: [AppSpec; 5] = [
    AppSpec {
        id: AppId::VsCode,
        name: "VS Code",
        icon: "</>",
        accent: (0x00, 0x7A, 0xCC),
        dial_label: "Refactor Intensity",
        buttons: [
            button("{}", "Refactor", "AI-powered code refactoring with configurable intensity"),
            button("?", "Explain", "Explain selected code in plain language"),
            button("T", "Write Tests", "Generate unit tests for selected function"),
            button("!", "Debug", "Identify and suggest fixes for bugs"),
            button(">>", "Optimize", "Performance optimization suggestions"),
            button("#", "Document", "Auto-generate JSDoc/docstrings"),
            button("~>", "Convert", "Convert code to another language"),
            button("@", "Review", "AI code review with suggestions"),
            button("**", "Complete", "Context-aware smart autocomplete"),
        ],
    },
    AppSpec {
        id: AppId::Chrome,
        name: "Chrome",
        icon: "W",
        accent: (0x42, 0x85, 0xF4),
        dial_label: "Summary Detail",
        buttons: [
            button("S", "Summarize", "Summarize the current page content"),
            button("Tr", "Translate", "Translate page content to any language"),
            button("[]", "Extract", "Extract structured data from the page"),
            button("Re", "Reply", "Draft an email reply to the current message"),
            button("\" \"", "Cite", "Generate academic citations from the page"),
            button("Aa", "Simplify", "Simplify complex language to plain English"),
            button("<>", "Compare", "Compare this article with other sources"),
            button("K", "Key Points", "Extract and list key takeaways"),
            button(")|", "Read Aloud", "Convert page text to speech"),
        ],
    },
    AppSpec {
        id: AppId::Figma,
        name: "Figma",
        icon: "F",
        accent: (0xA2, 0x59, 0xFF),
        dial_label: "Creative Freedom",
        buttons: [
            button("Alt", "Alt Text", "Generate accessibility alt text for images"),
            button("C", "Color Fix", "Fix contrast issues for WCAG compliance"),
            button("|-|", "Layout", "AI-powered layout suggestions"),
            button("Tx", "Copy", "Generate UI copy and microcopy"),
            button("++", "Variants", "Auto-generate component variants"),
            button("Q", "Inspect", "Check against design system rules"),
            button("//", "Animate", "Suggest micro-interactions and animations"),
            button("[ ]", "Resize", "Smart responsive resize suggestions"),
            button("..", "Feedback", "AI design critique and suggestions"),
        ],
    },
    AppSpec {
        id: AppId::Slack,
        name: "Slack",
        icon: "#",
        accent: (0xE0, 0x1E, 0x5A),
        dial_label: "Formality Level",
        buttons: [
            button("Tn", "Tone Shift", "Adjust message tone (casual <-> formal)"),
            button("SU", "Standup", "Generate daily standup update"),
            button("=", "Thread Sum", "Summarize a long thread"),
            button("v", "Actions", "Extract action items from conversation"),
            button(":)", "React", "Suggest appropriate emoji reactions"),
            button("@t", "Schedule", "Smart message scheduling"),
            button("Tr", "Translate", "Quick translate message"),
            button("[ ]", "Template", "Apply message templates"),
            button(">>>", "Announce", "Draft team announcement"),
        ],
    },
    AppSpec {
        id: AppId::Excel,
        name: "Excel",
        icon: "X",
        accent: (0x21, 0x73, 0x46),
        dial_label: "Analysis Depth",
        buttons: [
            button("fx", "Formula", "Generate complex formulas from plain English"),
            button("/\\", "Chart", "Smart chart type selection and creation"),
            button("~", "Clean", "Clean, deduplicate, and format messy data"),
            button("%", "Analyze", "Run statistical analysis on selected range"),
            button("+|", "Pivot", "Auto-generate pivot tables"),
            button("^", "Predict", "Trend prediction and forecasting"),
            button("!!", "Anomaly", "Detect outliers and anomalies in data"),
            button("&", "Merge", "Smart data merge from multiple sources"),
            button("Rp", "Report", "Generate formatted analysis report"),
        ],
    },
];
