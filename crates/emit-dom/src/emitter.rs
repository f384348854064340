//! JSX module serialization.
//!
//! Marked skeleton nodes render as indented JSX with `data-slot` markers;
//! block regions render as single-line arrow-function bodies inside
//! `__marq.when`/`__marq.each` calls, because a region is one replaceable
//! unit and carries no markers of its own.

use itertools::Itertools;
use marq_emit_core::escape::{escape_html_attr, escape_jsx_text};
use marq_emit_core::{EmitError, EmitOptions, Emission, TemplateEmitter};
use marq_ir::{BlockRegion, MarkedTemplate, SkeletonAttrValue, SkeletonElement, SkeletonNode};
use marq_types::{SCOPE_ATTR, SLOT_ATTR};

const BACKEND: &str = "dom";
const INDENT: &str = "  ";

/// Emits one JSX module per component for the client runtime.
#[derive(Debug, Default)]
pub struct JsxEmitter;

impl TemplateEmitter for JsxEmitter {
    fn backend_id(&self) -> &'static str {
        BACKEND
    }

    fn emit(
        &self,
        template: &MarkedTemplate,
        options: &EmitOptions,
    ) -> Result<Emission, EmitError> {
        log::debug!(
            "emitting dom module for component '{}' ({} slots)",
            template.component,
            template.slots.len()
        );

        let mut out = String::new();
        out.push_str(&format!(
            "import * as __marq from \"{}\";\n\n",
            options.runtime_module
        ));

        let params = if template.params.is_empty() {
            String::new()
        } else {
            format!("{{ {} }}", template.params.iter().join(", "))
        };
        out.push_str(&format!(
            "export function {}({}) {{\n",
            template.component, params
        ));
        out.push_str(INDENT);
        out.push_str("return (\n");
        render_root(&template.root, template.scope.as_str(), 2, &mut out)?;
        out.push_str(INDENT);
        out.push_str(");\n}\n");

        Ok(Emission {
            backend: BACKEND,
            source: out,
            // JSX represents every slot kind natively.
            omitted: vec![],
        })
    }

    fn file_name(&self, component: &str) -> String {
        format!("{}.client.jsx", component)
    }
}

/// Renders the root node, placing the scope attribute. A fragment root puts
/// the scope on each top-level element child; a non-element root is wrapped
/// in a span so the scope has an element to live on.
fn render_root(
    node: &SkeletonNode,
    scope: &str,
    depth: usize,
    out: &mut String,
) -> Result<(), EmitError> {
    match node {
        SkeletonNode::Element(element) => render_element(element, Some(scope), depth, out),
        SkeletonNode::Fragment(children) => {
            push_line(out, depth, "<>");
            for child in children {
                match child {
                    SkeletonNode::Element(element) => {
                        render_element(element, Some(scope), depth + 1, out)?;
                    }
                    other => render_node(other, depth + 1, out)?,
                }
            }
            push_line(out, depth, "</>");
            Ok(())
        }
        other => {
            push_line(
                out,
                depth,
                &format!("<span {}=\"{}\">", SCOPE_ATTR, escape_html_attr(scope)),
            );
            render_node(other, depth + 1, out)?;
            push_line(out, depth, "</span>");
            Ok(())
        }
    }
}

fn render_node(node: &SkeletonNode, depth: usize, out: &mut String) -> Result<(), EmitError> {
    match node {
        SkeletonNode::Element(element) => render_element(element, None, depth, out),
        SkeletonNode::Text(text) => {
            if !text.is_empty() {
                push_line(out, depth, &escape_jsx_text(text));
            }
            Ok(())
        }
        SkeletonNode::StaticExpr(expr) => {
            push_line(out, depth, &format!("{{{}}}", expr));
            Ok(())
        }
        SkeletonNode::TextSlot(id) => {
            let marker = id.attr_value();
            push_line(
                out,
                depth,
                &format!(
                    "<span {}=\"{}\">{{__marq.text(\"{}\")}}</span>",
                    SLOT_ATTR, marker, marker
                ),
            );
            Ok(())
        }
        SkeletonNode::Block { slot, region } => {
            let expr = region_expr(region)?;
            match slot {
                Some(id) => {
                    let marker = id.attr_value();
                    push_line(
                        out,
                        depth,
                        &format!("<template {}=\"{}\">", SLOT_ATTR, marker),
                    );
                    push_line(out, depth + 1, &format!("{{{}}}", expr));
                    push_line(out, depth, "</template>");
                }
                None => push_line(out, depth, &format!("{{{}}}", expr)),
            }
            Ok(())
        }
        SkeletonNode::Fragment(children) => {
            push_line(out, depth, "<>");
            for child in children {
                render_node(child, depth + 1, out)?;
            }
            push_line(out, depth, "</>");
            Ok(())
        }
    }
}

fn render_element(
    element: &SkeletonElement,
    scope: Option<&str>,
    depth: usize,
    out: &mut String,
) -> Result<(), EmitError> {
    let open = open_tag(element, scope);
    if element.children.is_empty() {
        push_line(out, depth, &format!("{} />", open));
        return Ok(());
    }
    push_line(out, depth, &format!("{}>", open));
    for child in &element.children {
        render_node(child, depth + 1, out)?;
    }
    push_line(out, depth, &format!("</{}>", element.tag));
    Ok(())
}

/// The open tag without its closing `>`: tag name, scope attribute, joined
/// slot marker, then source-order attributes.
fn open_tag(element: &SkeletonElement, scope: Option<&str>) -> String {
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
        open.push(' ');
        open.push_str(&render_attr(&attr.name, &attr.value));
    }
    open
}

fn render_attr(name: &str, value: &SkeletonAttrValue) -> String {
    match value {
        SkeletonAttrValue::Static(text) if text.is_empty() => name.to_string(),
        SkeletonAttrValue::Static(text) => format!("{}=\"{}\"", name, escape_html_attr(text)),
        SkeletonAttrValue::Expr(expr) => format!("{}={{{}}}", name, expr),
        SkeletonAttrValue::Slot(id) => {
            format!("{}={{__marq.attr(\"{}\")}}", name, id.attr_value())
        }
        SkeletonAttrValue::EventSlot(id) => {
            format!("{}={{__marq.handler(\"{}\")}}", name, id.attr_value())
        }
        SkeletonAttrValue::EventExpr(expr) => format!("{}={{() => ({})}}", name, expr),
    }
}

/// The runtime call replacing a block region. Branch and loop bodies render
/// as compact single-line JSX inside arrow functions.
fn region_expr(region: &BlockRegion) -> Result<String, EmitError> {
    match region {
        BlockRegion::If {
            condition,
            then_branch,
            else_branch,
        } => Ok(format!(
            "__marq.when({}, () => ({}), () => ({}))",
            condition,
            branch_body(then_branch)?,
            branch_body(else_branch)?
        )),
        BlockRegion::Each {
            item,
            source,
            key,
            body,
        } => Ok(format!(
            "__marq.each({}, ({}) => ({}), ({}) => ({}))",
            source,
            item,
            branch_body(body)?,
            item,
            key
        )),
    }
}

fn branch_body(nodes: &[SkeletonNode]) -> Result<String, EmitError> {
    match nodes {
        [] => Ok("null".to_string()),
        [SkeletonNode::Element(element)] => inline_element(element),
        _ => {
            let mut body = String::from("<>");
            for node in nodes {
                body.push_str(&inline_node(node)?);
            }
            body.push_str("</>");
            Ok(body)
        }
    }
}

fn inline_node(node: &SkeletonNode) -> Result<String, EmitError> {
    match node {
        SkeletonNode::Element(element) => inline_element(element),
        SkeletonNode::Text(text) => Ok(escape_jsx_text(text)),
        SkeletonNode::StaticExpr(expr) => Ok(format!("{{{}}}", expr)),
        SkeletonNode::Block { slot: None, region } => {
            Ok(format!("{{{}}}", region_expr(region)?))
        }
        SkeletonNode::Fragment(children) => {
            let mut body = String::from("<>");
            for child in children {
                body.push_str(&inline_node(child)?);
            }
            body.push_str("</>");
            Ok(body)
        }
        SkeletonNode::TextSlot(_) | SkeletonNode::Block { slot: Some(_), .. } => {
            Err(EmitError::Backend {
                backend: BACKEND,
                message: "marked slot inside a block region".to_string(),
            })
        }
    }
}

fn inline_element(element: &SkeletonElement) -> Result<String, EmitError> {
    let open = open_tag(element, None);
    if element.children.is_empty() {
        return Ok(format!("{} />", open));
    }
    let mut out = format!("{}>", open);
    for child in &element.children {
        out.push_str(&inline_node(child)?);
    }
    out.push_str(&format!("</{}>", element.tag));
    Ok(out)
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(line);
    out.push('\n');
}
