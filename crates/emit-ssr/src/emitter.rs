//! Tag-delimited HTML serialization.
//!
//! Slot markers and element structure match the dom backend byte for byte
//! in identifier terms; only the surface syntax differs. Event handlers
//! cannot be expressed server-side, so the marker stays on the element (the
//! hydrating runtime locates it there) while the handler itself is dropped
//! and its slot recorded as omitted.

use itertools::Itertools;
use marq_emit_core::escape::{VOID_ELEMENTS, escape_html_attr, escape_html_text};
use marq_emit_core::{EmitError, EmitOptions, Emission, TemplateEmitter};
use marq_ir::{BlockRegion, MarkedTemplate, SkeletonAttrValue, SkeletonElement, SkeletonNode};
use marq_types::{SCOPE_ATTR, SLOT_ATTR, SlotId};

const BACKEND: &str = "ssr";
const INDENT: &str = "  ";

/// Emits one HTML template per component for server rendering.
#[derive(Debug, Default)]
pub struct SsrEmitter;

impl TemplateEmitter for SsrEmitter {
    fn backend_id(&self) -> &'static str {
        BACKEND
    }

    fn emit(
        &self,
        template: &MarkedTemplate,
        options: &EmitOptions,
    ) -> Result<Emission, EmitError> {
        log::debug!(
            "emitting ssr template for component '{}' ({} slots)",
            template.component,
            template.slots.len()
        );

        let mut writer = SsrWriter {
            template,
            minify: options.minify,
            out: String::new(),
            omitted: Vec::new(),
        };
        writer.root(&template.root)?;

        Ok(Emission {
            backend: BACKEND,
            source: writer.out,
            omitted: writer.omitted,
        })
    }

    fn file_name(&self, component: &str) -> String {
        format!("{}.server.html", component)
    }
}

struct SsrWriter<'a> {
    template: &'a MarkedTemplate,
    minify: bool,
    out: String,
    omitted: Vec<SlotId>,
}

impl SsrWriter<'_> {
    fn root(&mut self, node: &SkeletonNode) -> Result<(), EmitError> {
        let scope = self.template.scope.to_string();
        match node {
            SkeletonNode::Element(element) => self.element(element, Some(&scope), 0),
            SkeletonNode::Fragment(children) => {
                for child in children {
                    match child {
                        SkeletonNode::Element(element) => {
                            self.element(element, Some(&scope), 0)?;
                        }
                        other => self.node(other, 0)?,
                    }
                }
                Ok(())
            }
            other => {
                self.line(
                    0,
                    &format!("<span {}=\"{}\">", SCOPE_ATTR, escape_html_attr(&scope)),
                );
                self.node(other, 1)?;
                self.line(0, "</span>");
                Ok(())
            }
        }
    }

    fn node(&mut self, node: &SkeletonNode, depth: usize) -> Result<(), EmitError> {
        match node {
            SkeletonNode::Element(element) => self.element(element, None, depth),
            SkeletonNode::Text(text) => {
                if !text.is_empty() {
                    let escaped = escape_html_text(text);
                    self.line(depth, &escaped);
                }
                Ok(())
            }
            SkeletonNode::StaticExpr(expr) => {
                self.line(depth, &format!("{{{{ {} }}}}", expr));
                Ok(())
            }
            SkeletonNode::TextSlot(id) => {
                let slot = self.slot_entry(*id)?;
                self.line(
                    depth,
                    &format!(
                        "<span {}=\"{}\">{{{{ {} }}}}</span>",
                        SLOT_ATTR,
                        id.attr_value(),
                        slot.expr
                    ),
                );
                Ok(())
            }
            SkeletonNode::Block { slot, region } => {
                match slot {
                    Some(id) => {
                        self.line(
                            depth,
                            &format!("<template {}=\"{}\">", SLOT_ATTR, id.attr_value()),
                        );
                        self.region(region, depth + 1)?;
                        self.line(depth, "</template>");
                    }
                    None => self.region(region, depth)?,
                }
                Ok(())
            }
            SkeletonNode::Fragment(children) => {
                for child in children {
                    self.node(child, depth)?;
                }
                Ok(())
            }
        }
    }

    fn region(&mut self, region: &BlockRegion, depth: usize) -> Result<(), EmitError> {
        match region {
            BlockRegion::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.line(depth, &format!("{{% if {} %}}", condition));
                for node in then_branch {
                    self.node(node, depth + 1)?;
                }
                if !else_branch.is_empty() {
                    self.line(depth, "{% else %}");
                    for node in else_branch {
                        self.node(node, depth + 1)?;
                    }
                }
                self.line(depth, "{% endif %}");
                Ok(())
            }
            BlockRegion::Each {
                item, source, body, ..
            } => {
                // Keyed reconciliation is a client concern; the server just
                // renders the list in order.
                self.line(depth, &format!("{{% for {} in {} %}}", item, source));
                for node in body {
                    self.node(node, depth + 1)?;
                }
                self.line(depth, "{% endfor %}");
                Ok(())
            }
        }
    }

    fn element(
        &mut self,
        element: &SkeletonElement,
        scope: Option<&str>,
        depth: usize,
    ) -> Result<(), EmitError> {
        let open = self.open_tag(element, scope)?;
        if VOID_ELEMENTS.contains(element.tag.as_str()) {
            self.line(depth, &format!("{}>", open));
            return Ok(());
        }
        if element.children.is_empty() {
            self.line(depth, &format!("{}></{}>", open, element.tag));
            return Ok(());
        }
        self.line(depth, &format!("{}>", open));
        for child in &element.children {
            self.node(child, depth + 1)?;
        }
        self.line(depth, &format!("</{}>", element.tag));
        Ok(())
    }

    fn open_tag(
        &mut self,
        element: &SkeletonElement,
        scope: Option<&str>,
    ) -> Result<String, EmitError> {
        let mut open = format!("<{}", element.tag);
        if let Some(scope) = scope {
            open.push_str(&format!(" {}=\"{}\"", SCOPE_ATTR, escape_html_attr(scope)));
        }
        let slot_ids = element.attr_slot_ids();
        if !slot_ids.is_empty() {
            let markers = slot_ids.iter().map(|id| id.attr_value()).join(" ");
            open.push_str(&format!(" {}=\"{}\"", SLOT_ATTR, markers));
        }
        for attr in &element.attrs {
            match &attr.value {
                SkeletonAttrValue::Static(text) if text.is_empty() => {
                    open.push_str(&format!(" {}", attr.name));
                }
                SkeletonAttrValue::Static(text) => {
                    open.push_str(&format!(" {}=\"{}\"", attr.name, escape_html_attr(text)));
                }
                SkeletonAttrValue::Expr(expr) => {
                    open.push_str(&format!(" {}=\"{{{{ {} }}}}\"", attr.name, expr));
                }
                SkeletonAttrValue::Slot(id) => {
                    let slot = self.slot_entry(*id)?;
                    open.push_str(&format!(" {}=\"{{{{ {} }}}}\"", attr.name, slot.expr));
                }
                SkeletonAttrValue::EventSlot(id) => {
                    // Marker already written; the handler itself has no
                    // server-side form.
                    self.omitted.push(*id);
                }
                SkeletonAttrValue::EventExpr(_) => {}
            }
        }
        Ok(open)
    }

    fn slot_entry(&self, id: SlotId) -> Result<&marq_ir::Slot, EmitError> {
        self.template.slot(id).ok_or_else(|| EmitError::Backend {
            backend: BACKEND,
            message: format!("skeleton references unknown slot {}", id),
        })
    }

    fn line(&mut self, depth: usize, text: &str) {
        if !self.minify {
            for _ in 0..depth {
                self.out.push_str(INDENT);
            }
        }
        self.out.push_str(text);
        self.out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marq_analysis::Analysis;
    use marq_syntax::parse_component;

    fn emit_src(src: &str) -> Emission {
        emit_with(src, &EmitOptions::default())
    }

    fn emit_with(src: &str, options: &EmitOptions) -> Emission {
        let component = parse_component(src).unwrap();
        let analysis = Analysis::analyze(&component).unwrap();
        let template = marq_extract::extract(&component, &analysis).unwrap();
        SsrEmitter.emit(&template, options).unwrap()
    }

    const COUNTER: &str = r#"
component Counter() {
    let count = signal(0);
    let doubled = derived(count * 2);

    <div class="counter">
        <span>{count}</span>
        <span>{doubled}</span>
        <button onClick={count = count + 1}>+</button>
    </div>
}
"#;

    #[test]
    fn test_counter_template_shape() {
        let emission = emit_src(COUNTER);
        assert!(
            emission
                .source
                .contains("<div data-scope=\"Counter\" class=\"counter\">")
        );
        assert!(
            emission
                .source
                .contains("<span data-slot=\"slot_0\">{{ count }}</span>")
        );
        assert!(
            emission
                .source
                .contains("<span data-slot=\"slot_1\">{{ doubled }}</span>")
        );
    }

    #[test]
    fn test_event_slot_marked_but_omitted() {
        let emission = emit_src(COUNTER);
        // The element keeps its marker for hydration.
        assert!(emission.source.contains("<button data-slot=\"slot_2\">"));
        // The handler attribute itself never reaches the server template.
        assert!(!emission.source.contains("onClick"));
        assert_eq!(emission.omitted, vec![SlotId::new(2)]);
    }

    #[test]
    fn test_conditional_tags() {
        let emission = emit_src(
            r#"component C() {
                let show = signal(true);
                <div>
                    {#if show}
                        <p>yes</p>
                    {#else}
                        <p>no</p>
                    {/if}
                </div>
            }"#,
        );
        assert!(emission.source.contains("<template data-slot=\"slot_0\">"));
        assert!(emission.source.contains("{% if show %}"));
        assert!(emission.source.contains("{% else %}"));
        assert!(emission.source.contains("{% endif %}"));
    }

    #[test]
    fn test_for_tags_drop_key() {
        let emission = emit_src(
            r#"component List(items) {
                let n = signal(0);
                <ul>
                    {#for item in items key item.id}
                        <li>{item.name}</li>
                    {/for}
                </ul>
            }"#,
        );
        assert!(emission.source.contains("{% for item in items %}"));
        assert!(emission.source.contains("{{ item.name }}"));
        assert!(emission.source.contains("{% endfor %}"));
        assert!(!emission.source.contains("item.id"));
    }

    #[test]
    fn test_text_escaped() {
        let emission = emit_src(
            r#"component C() {
                <p>a &lt; b</p>
            }"#,
        );
        assert!(emission.source.contains("a &amp;lt; b"));
    }

    #[test]
    fn test_minify_strips_indentation() {
        let options = EmitOptions {
            minify: true,
            ..EmitOptions::default()
        };
        let emission = emit_with(COUNTER, &options);
        for line in emission.source.lines() {
            assert!(!line.starts_with(' '));
        }
    }

    #[test]
    fn test_void_element_has_no_closing_tag() {
        let emission = emit_src(
            r#"component C() {
                <div><br/></div>
            }"#,
        );
        assert!(emission.source.contains("<br>"));
        assert!(!emission.source.contains("</br>"));
    }

    #[test]
    fn test_same_slot_identifiers_as_dom_contract() {
        let emission = emit_src(COUNTER);
        for marker in ["slot_0", "slot_1", "slot_2"] {
            assert!(emission.source.contains(marker));
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(SsrEmitter.file_name("Counter"), "Counter.server.html");
    }
}
