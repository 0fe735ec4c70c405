//! Markdown rendering with syntax highlighting
//!
//! Rendering runs as a fixed pipeline: pulldown-cmark parses the source into
//! an event stream, each [`Transform`] stage rewrites that stream in order,
//! and the result is serialized to HTML. Stages hold no per-call state, so a
//! single renderer is reused for every post.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::error::RenderError;
use crate::config::MarkdownConfig;

/// Class style shared by highlighted markup and the generated stylesheet
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// A single stage of the rendering pipeline
pub trait Transform: Send + Sync {
    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, RenderError>;
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    stages: Vec<Box<dyn Transform>>,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(&MarkdownConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(config: &MarkdownConfig) -> Self {
        let mut stages: Vec<Box<dyn Transform>> = vec![Box::new(Highlight::new())];
        if config.pretty {
            stages.push(Box::new(Prettify));
        }

        Self {
            stages,
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
        }
    }

    /// Append a stage to the end of the pipeline
    pub fn push_stage(&mut self, stage: impl Transform + 'static) {
        self.stages.push(Box::new(stage));
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        // YAML metadata blocks stay disabled: FrontMatter::parse() strips them first
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;

        let mut events: Vec<Event> = Parser::new_ext(markdown, options).collect();
        for stage in &self.stages {
            events = stage.apply(events)?;
        }

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// CSS for the configured theme, matching the classes emitted by [`Highlight`]
    pub fn stylesheet(&self) -> Result<String, RenderError> {
        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .ok_or_else(|| RenderError::Theme(format!("unknown theme `{}`", self.theme_name)))?;

        css_for_theme_with_class_style(theme, CLASS_STYLE)
            .map_err(|e| RenderError::Theme(e.to_string()))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces code blocks with class-annotated syntect markup
pub struct Highlight {
    syntax_set: SyntaxSet,
}

impl Highlight {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    fn find_syntax(&self, lang: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> Result<String, RenderError> {
        let Some(lang) = lang else {
            return Ok(format!("<pre><code>{}</code></pre>\n", html_escape(code)));
        };

        let syntax = self.find_syntax(lang);
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| RenderError::Highlight {
                    lang: lang.to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(format!(
            r#"<pre class="highlight"><code class="language-{}">{}</code></pre>
"#,
            html_escape(lang),
            generator.finalize()
        ))
    }
}

impl Default for Highlight {
    fn default() -> Self {
        Self::new()
    }
}

struct CodeBlock {
    lang: Option<String>,
    source: String,
}

impl Transform for Highlight {
    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, RenderError> {
        let mut output = Vec::with_capacity(events.len());
        let mut block: Option<CodeBlock> = None;

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    block = Some(CodeBlock {
                        lang: fence_language(&kind),
                        source: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(code) = block.take() {
                        let highlighted = self.highlight_code(&code.source, code.lang.as_deref())?;
                        output.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) => match block.as_mut() {
                    Some(code) => code.source.push_str(&text),
                    None => output.push(Event::Text(text)),
                },
                _ => output.push(event),
            }
        }

        Ok(output)
    }
}

/// Separates top-level blocks with a blank line
pub struct Prettify;

impl Transform for Prettify {
    fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, RenderError> {
        let mut output = Vec::with_capacity(events.len() + events.len() / 4);
        let mut depth = 0usize;

        for event in events {
            let closes_top_level = match &event {
                Event::Start(_) => {
                    depth += 1;
                    false
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    depth == 0
                }
                Event::Html(_) | Event::Rule => depth == 0,
                _ => false,
            };

            output.push(event);
            if closes_top_level {
                output.push(Event::Html(CowStr::Borrowed("\n")));
            }
        }

        Ok(output)
    }
}

/// First word of a fenced block's info string, e.g. `rust` in "rust,ignore"
fn fence_language(kind: &CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split(|c: char| c.is_whitespace() || c == ',')
            .next()
            .filter(|lang| !lang.is_empty())
            .map(|lang| lang.to_ascii_lowercase()),
        CodeBlockKind::Indented => None,
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains(r#"<pre class="highlight"><code class="language-rust">"#));
        assert!(html.contains("hl-source hl-rust"));
    }

    #[test]
    fn test_plain_paragraph_has_no_highlighting() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Just some *prose* here.").unwrap();
        assert!(!html.contains("hl-"));
        assert!(!html.contains("language-"));
        assert!(!html.contains("highlight"));
    }

    #[test]
    fn test_code_block_without_language() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\n<b>raw</b>\n```").unwrap();
        assert!(html.contains("<pre><code>&lt;b&gt;raw&lt;/b&gt;\n</code></pre>"));
        assert!(!html.contains("hl-"));
    }

    #[test]
    fn test_indented_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Intro\n\n    let x = 1;\n").unwrap();
        assert!(html.contains("<pre><code>let x = 1;\n</code></pre>"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```nosuchlang\nsome code\n```").unwrap();
        assert!(html.contains(r#"class="language-nosuchlang""#));
        assert!(html.contains("some code"));
    }

    #[test]
    fn test_info_string_attributes_are_ignored() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```Python title=x\nprint(1)\n```").unwrap();
        assert!(html.contains(r#"class="language-python""#));
        assert!(html.contains("hl-python"));
    }

    #[test]
    fn test_inline_code_is_untouched() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Use `cargo` here.").unwrap();
        assert!(html.contains("<code>cargo</code>"));
        assert!(!html.contains("hl-"));
    }

    #[test]
    fn test_renderer_is_reusable() {
        let renderer = MarkdownRenderer::new();
        let source = "```rust\nlet a = 1;\n```\n\nafter";
        let first = renderer.render(source).unwrap();
        let second = renderer.render(source).unwrap();
        assert_eq!(first, second);
        assert!(second.contains("<p>after</p>"));
    }

    #[test]
    fn test_prettify_separates_blocks() {
        let config = MarkdownConfig {
            pretty: true,
            ..Default::default()
        };
        let renderer = MarkdownRenderer::with_options(&config);
        let html = renderer.render("# Title\n\nFirst.\n\n- a\n- b\n").unwrap();
        assert!(html.contains("<h1>Title</h1>\n\n<p>First.</p>\n\n<ul>"));
    }

    #[test]
    fn test_pushed_stage_runs_last() {
        struct Shout;

        impl Transform for Shout {
            fn apply<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, RenderError> {
                Ok(events
                    .into_iter()
                    .map(|event| match event {
                        Event::Text(text) => Event::Text(text.to_uppercase().into()),
                        other => other,
                    })
                    .collect())
            }
        }

        let mut renderer = MarkdownRenderer::new();
        renderer.push_stage(Shout);
        let html = renderer.render("quiet").unwrap();
        assert!(html.contains("<p>QUIET</p>"));
    }

    #[test]
    fn test_stylesheet_uses_prefixed_classes() {
        let renderer = MarkdownRenderer::new();
        let css = renderer.stylesheet().unwrap();
        assert!(css.contains(".hl-"));
    }

    #[test]
    fn test_unknown_theme_is_an_error() {
        let config = MarkdownConfig {
            theme: "no-such-theme".to_string(),
            ..Default::default()
        };
        let renderer = MarkdownRenderer::with_options(&config);
        assert!(matches!(renderer.stylesheet(), Err(RenderError::Theme(_))));
    }
}
