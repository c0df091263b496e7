//! Live-preview document assembly.
//!
//! Filters the project tree to the three conventionally-named files and
//! concatenates them into a single HTML document for injection into a
//! sandboxed rendering context.

use crate::tree::node::Node;

pub const HTML_FILE: &str = "index.html";
pub const CSS_FILE: &str = "style.css";
pub const JS_FILE: &str = "script.js";

/// Capabilities granted to the preview sandbox. Script execution and modal
/// dialogs only; top-level navigation and same-origin access stay denied.
pub const SANDBOX_CAPABILITIES: &str = "allow-scripts allow-modals";

/// The three preview source texts, empty when the file is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewBundle {
    pub html: String,
    pub css: String,
    pub js: String,
}

/// Collect the preview sources from the tree, depth-first first-match per
/// name.
pub fn collect(tree: &[Node]) -> PreviewBundle {
    let mut bundle = PreviewBundle::default();
    fn walk(nodes: &[Node], bundle: &mut PreviewBundle) {
        for node in nodes {
            match node {
                Node::File(file) => match file.name.as_str() {
                    HTML_FILE if bundle.html.is_empty() => bundle.html = file.content.clone(),
                    CSS_FILE if bundle.css.is_empty() => bundle.css = file.content.clone(),
                    JS_FILE if bundle.js.is_empty() => bundle.js = file.content.clone(),
                    _ => {}
                },
                Node::Folder(folder) => walk(&folder.children, bundle),
            }
        }
    }
    walk(tree, &mut bundle);
    bundle
}

/// Assemble the full preview document: markup with the stylesheet inlined in
/// the head and the script appended at the end of the body.
pub fn render_document(bundle: &PreviewBundle) -> String {
    let style_block = format!("<style>\n{}\n</style>", bundle.css);
    let script_block = format!("<script>\n{}\n</script>", bundle.js);

    let mut doc = bundle.html.clone();
    if let Some(idx) = doc.find("</head>") {
        doc.insert_str(idx, &style_block);
    } else {
        doc = format!("{}\n{}", style_block, doc);
    }
    if let Some(idx) = doc.find("</body>") {
        doc.insert_str(idx, &script_block);
    } else {
        doc.push('\n');
        doc.push_str(&script_block);
    }
    doc
}

/// Convenience: collect and render in one step.
pub fn render_from_tree(tree: &[Node]) -> String {
    render_document(&collect(tree))
}
