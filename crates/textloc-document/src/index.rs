//! Flattened text index over a document.
//!
//! The index renders the document once into two normalized text streams:
//! the full text, and the text without the content of form controls. Every
//! visited node is given its `[start, end)` range in both streams. All
//! queries are answered from these ranges, never by re-reading the tree.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use textloc_core::{Error, FindSpot, Result};
use textloc_pattern::SearchPattern;

use crate::document::{Document, Node};
use crate::kind::{ElementKind, InputType};
use crate::normalized::NormalizedText;
use crate::table::{parse_span, CellSpec, TableLayout, MAX_COLSPAN, MAX_ROWSPAN};

/// Handle of a node inside a [`DocumentIndex`].
///
/// Ids are assigned in document order; the body is always `NodeId(0)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The document body.
    pub const BODY: NodeId = NodeId(0);

    /// Position in document order.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only queries over a rendered document.
///
/// Locator strategies only talk to the document through this trait. Text
/// queries return `None` for nodes that were never rendered, e.g. the
/// descendants of hidden elements.
pub trait TextIndex {
    /// The whole flattened text.
    fn text(&self) -> &str;

    /// First occurrence of `pattern` in the text.
    fn first_occurence(&self, pattern: &SearchPattern) -> FindSpot {
        pattern.first_occurence_in(self.text())
    }

    /// First occurrence of `pattern` at or after `from`.
    fn first_occurence_from(&self, pattern: &SearchPattern, from: usize) -> FindSpot {
        pattern.first_occurence_in_from(self.text(), from)
    }

    /// Minimal, non-overlapping occurrences of `pattern`, left to right.
    fn occurences(&self, pattern: &SearchPattern) -> Vec<FindSpot> {
        pattern.occurences_in(self.text())
    }

    /// Range of a node in the text.
    fn position(&self, node: NodeId) -> Option<FindSpot>;

    /// Text before a node.
    fn text_before(&self, node: NodeId) -> Option<String>;

    /// Text of a node and its descendants.
    fn as_text(&self, node: NodeId) -> Option<String>;

    /// Text of a node and its descendants, form controls left out.
    fn as_text_without_form_controls(&self, node: NodeId) -> Option<String>;

    /// Text between the previous form control (or the start of the form
    /// region) and the element. Text before `start` is ignored.
    fn label_text_before(&self, node: NodeId, start: usize) -> Option<String>;

    /// Like [`TextIndex::label_text_before`], but controls the element is
    /// nested in do not bound the text.
    fn labeling_text_before(&self, node: NodeId, start: usize) -> Option<String>;

    /// Text between the element and the next form control or the end of its
    /// form.
    fn label_text_after(&self, node: NodeId) -> Option<String>;

    /// Attribute value of an element.
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Tag name of an element.
    fn tag(&self, node: NodeId) -> Option<&str>;

    /// Classification of an element.
    fn kind(&self, node: NodeId) -> Option<ElementKind>;

    /// Whether the node and all its ancestors are displayed.
    fn is_displayed(&self, node: NodeId) -> bool;

    /// Element with the given `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Parent node.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Descendant elements in document order.
    fn descendants(&self, node: NodeId) -> Vec<NodeId>;

    /// Displayed elements in document order.
    fn visible_elements(&self) -> &[NodeId];

    /// The table cell containing the node, the node itself included.
    fn enclosing_cell(&self, node: NodeId) -> Option<NodeId>;

    /// The row containing a cell.
    fn enclosing_row(&self, node: NodeId) -> Option<NodeId>;

    /// The table containing a row.
    fn enclosing_table(&self, node: NodeId) -> Option<NodeId>;

    /// Slot column where a cell starts.
    fn cell_index_in_row(&self, cell: NodeId) -> Option<usize>;

    /// Index of a row in its table.
    fn row_index_in_table(&self, row: NodeId) -> Option<usize>;

    /// Number of rows of a table.
    fn row_count(&self, table: NodeId) -> usize;

    /// Number of slot columns of a table.
    fn column_count(&self, table: NodeId) -> usize;

    /// Cells declared in a row of a table.
    fn row_cells(&self, table: NodeId, row: usize) -> Vec<NodeId>;

    /// Cell covering slot `(row, col)` of a table.
    fn cell_at(&self, table: NodeId, row: usize, col: usize) -> Option<NodeId>;

    /// Whether a cell spans past the right or bottom edge of its table.
    fn spans_past_edge(&self, cell: NodeId) -> bool;

    /// `colspan` of a cell, at least 1.
    fn colspan(&self, cell: NodeId) -> usize {
        parse_span(self.attribute(cell, "colspan"), MAX_COLSPAN)
    }

    /// `rowspan` of a cell, at least 1.
    fn rowspan(&self, cell: NodeId) -> usize {
        parse_span(self.attribute(cell, "rowspan"), MAX_ROWSPAN)
    }

    /// Short human-readable description of an element for reports.
    fn describe(&self, node: NodeId) -> String {
        let Some(tag) = self.tag(node) else {
            return format!("text {node}");
        };
        let mut description = tag.to_string();
        if let Some(input_type) = self.attribute(node, "type") {
            description.push_str(&format!("[type={input_type}]"));
        }
        for name in ["id", "name"] {
            if let Some(value) = self.attribute(node, name) {
                description.push_str(&format!(" ({name}='{value}')"));
            }
        }
        description
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        tag: String,
        kind: ElementKind,
        attributes: BTreeMap<String, String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct IndexedNode {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    displayed: bool,
    /// Nearest enclosing form, the node itself excluded
    form: Option<NodeId>,
    position: Option<FindSpot>,
    position_without_form_controls: Option<FindSpot>,
}

impl IndexedNode {
    fn kind(&self) -> Option<ElementKind> {
        match &self.data {
            NodeData::Element { kind, .. } => Some(*kind),
            NodeData::Text(_) => None,
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        match &self.data {
            NodeData::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeData::Text(_) => None,
        }
    }
}

/// Concrete [`TextIndex`] built from a [`Document`].
#[derive(Debug, Clone)]
pub struct DocumentIndex {
    title: Option<String>,
    nodes: Vec<IndexedNode>,
    text: NormalizedText,
    text_without_form_controls: NormalizedText,
    rendered: String,
    /// Nodes in visiting order
    order: Vec<NodeId>,
    order_positions: HashMap<NodeId, usize>,
    visible_elements: Vec<NodeId>,
    ids: HashMap<String, NodeId>,
    tables: HashMap<NodeId, TableLayout>,
}

impl DocumentIndex {
    /// Index a document.
    pub fn new(document: &Document) -> Self {
        let mut index = Self {
            title: document.title.clone(),
            nodes: Vec::new(),
            text: NormalizedText::new(),
            text_without_form_controls: NormalizedText::new(),
            rendered: String::new(),
            order: Vec::new(),
            order_positions: HashMap::new(),
            visible_elements: Vec::new(),
            ids: HashMap::new(),
            tables: HashMap::new(),
        };

        index.nodes.push(IndexedNode {
            data: NodeData::Element {
                tag: "body".to_string(),
                kind: ElementKind::Body,
                attributes: BTreeMap::new(),
            },
            parent: None,
            children: Vec::new(),
            displayed: true,
            form: None,
            position: None,
            position_without_form_controls: None,
        });
        for node in &document.body {
            let child = index.insert(node, NodeId::BODY);
            index.nodes[0].children.push(child);
        }

        index.layout_tables();
        index.visit(NodeId::BODY);
        index.rendered = index.text.to_string();

        debug!(
            "Indexed document: {} nodes, {} visible elements, {} chars of text",
            index.nodes.len(),
            index.visible_elements.len(),
            index.rendered.chars().count()
        );
        index
    }

    /// Document title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The text without form-control content.
    pub fn text_without_form_controls(&self) -> String {
        self.text_without_form_controls.to_string()
    }

    /// Number of nodes, the body included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Element with the given `id`, or [`Error::ElementNotFound`].
    pub fn require_element_by_id(&self, id: &str) -> Result<NodeId> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| Error::ElementNotFound(id.to_string()))
    }

    /// Layout of a table element.
    pub fn table_layout(&self, table: NodeId) -> Option<&TableLayout> {
        self.tables.get(&table)
    }

    fn node(&self, id: NodeId) -> Option<&IndexedNode> {
        self.nodes.get(id.0)
    }

    fn insert(&mut self, node: &Node, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        let (parent_displayed, parent_form, parent_is_form) = match self.node(parent) {
            Some(p) => (p.displayed, p.form, p.kind() == Some(ElementKind::Form)),
            None => (true, None, false),
        };
        let form = if parent_is_form { Some(parent) } else { parent_form };

        match node {
            Node::Text { text } => {
                self.nodes.push(IndexedNode {
                    data: NodeData::Text(text.clone()),
                    parent: Some(parent),
                    children: Vec::new(),
                    displayed: parent_displayed,
                    form,
                    position: None,
                    position_without_form_controls: None,
                });
            }
            Node::Element {
                tag,
                attributes,
                children,
                hidden,
            } => {
                let tag = tag.to_ascii_lowercase();
                let kind = ElementKind::classify(&tag, attributes.get("type").map(String::as_str));
                if let Some(element_id) = attributes.get("id") {
                    if self.ids.contains_key(element_id) {
                        warn!("Duplicate element id '{}', keeping the first", element_id);
                    } else {
                        self.ids.insert(element_id.clone(), id);
                    }
                }
                self.nodes.push(IndexedNode {
                    data: NodeData::Element {
                        tag,
                        kind,
                        attributes: attributes.clone(),
                    },
                    parent: Some(parent),
                    children: Vec::new(),
                    displayed: parent_displayed && !hidden,
                    form,
                    position: None,
                    position_without_form_controls: None,
                });
                for child in children {
                    let child_id = self.insert(child, id);
                    self.nodes[id.0].children.push(child_id);
                }
            }
        }
        id
    }

    fn layout_tables(&mut self) {
        let tables: Vec<NodeId> = (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| self.nodes[id.0].kind() == Some(ElementKind::Table))
            .collect();

        for table in tables {
            let mut rows = Vec::new();
            self.collect_rows(table, &mut rows);
            let rows = rows
                .into_iter()
                .map(|row| {
                    let cells = self.nodes[row.0]
                        .children
                        .iter()
                        .filter(|c| self.nodes[c.0].kind() == Some(ElementKind::TableCell))
                        .map(|&cell| CellSpec {
                            cell,
                            colspan: self.colspan(cell),
                            rowspan: self.rowspan(cell),
                        })
                        .collect();
                    (row, cells)
                })
                .collect();
            self.tables.insert(table, TableLayout::build(rows));
        }
        trace!("Laid out {} tables", self.tables.len());
    }

    /// Rows of `table`, not descending into nested tables.
    fn collect_rows(&self, parent: NodeId, rows: &mut Vec<NodeId>) {
        for &child in &self.nodes[parent.0].children {
            match self.nodes[child.0].kind() {
                Some(ElementKind::TableRow) => rows.push(child),
                Some(ElementKind::Table) | None => {}
                Some(_) => self.collect_rows(child, rows),
            }
        }
    }

    fn visit(&mut self, id: NodeId) {
        self.order_positions.insert(id, self.order.len());
        self.order.push(id);

        let start = self.text.len();
        let start_without_form_controls = self.text_without_form_controls.len();

        if self.nodes[id.0].displayed {
            let is_element = self.nodes[id.0].kind().is_some();
            if is_element {
                self.visible_elements.push(id);
            }
            self.render(id);
        }

        let node = &mut self.nodes[id.0];
        node.position = Some(FindSpot::new(start, self.text.len()));
        node.position_without_form_controls = Some(FindSpot::new(
            start_without_form_controls,
            self.text_without_form_controls.len(),
        ));
    }

    fn visit_children(&mut self, id: NodeId) {
        for child in self.nodes[id.0].children.clone() {
            self.visit(child);
        }
    }

    fn blank_both(&mut self) {
        self.text.append_blank();
        self.text_without_form_controls.append_blank();
    }

    fn append_attribute(&mut self, id: NodeId, name: &str, both: bool) {
        if let Some(value) = self.nodes[id.0].attribute(name) {
            self.text.append(value);
            if both {
                self.text_without_form_controls.append(value);
            }
        }
    }

    fn render(&mut self, id: NodeId) {
        let kind = match &self.nodes[id.0].data {
            NodeData::Text(text) => {
                self.text.append(text);
                self.text_without_form_controls.append(text);
                return;
            }
            NodeData::Element { kind, .. } => *kind,
        };

        if kind.is_silent() {
            return;
        }
        match kind {
            ElementKind::Break => self.blank_both(),
            ElementKind::Image => self.append_attribute(id, "alt", true),
            ElementKind::Select => {
                self.text_without_form_controls.disable_append();
                for item in self.descendants(id) {
                    if matches!(
                        self.nodes[item.0].kind(),
                        Some(ElementKind::Option | ElementKind::OptionGroup)
                    ) {
                        self.blank_both();
                        self.visit(item);
                    }
                }
                self.text_without_form_controls.enable_append();
                self.blank_both();
            }
            ElementKind::OptionGroup => self.append_attribute(id, "label", false),
            ElementKind::Legend => {
                self.visit_children(id);
                self.blank_both();
            }
            ElementKind::Input(InputType::Submit | InputType::Reset | InputType::Button) => {
                self.append_attribute(id, "value", false);
                self.text.append_blank();
            }
            ElementKind::Input(InputType::Checkbox | InputType::Radio) => {
                self.text_without_form_controls.disable_append();
                self.visit_children(id);
                self.text_without_form_controls.enable_append();
                self.blank_both();
            }
            ElementKind::Input(InputType::Image) => self.append_attribute(id, "alt", false),
            ElementKind::Input(_) => self.append_attribute(id, "value", false),
            ElementKind::TextArea => {
                self.text_without_form_controls.disable_append();
                self.visit_children(id);
                self.text_without_form_controls.enable_append();
            }
            ElementKind::Button => {
                self.blank_both();
                self.text_without_form_controls.disable_append();
                self.visit_children(id);
                self.text_without_form_controls.enable_append();
                self.blank_both();
            }
            ElementKind::OrderedList => self.render_ordered_list(id),
            _ => {
                let block = kind.is_block();
                if block {
                    self.blank_both();
                }
                self.visit_children(id);
                if block {
                    self.blank_both();
                }
            }
        }
    }

    /// Items are numbered `"N. "`; an item's range starts at its number.
    fn render_ordered_list(&mut self, id: NodeId) {
        self.blank_both();

        let mut number = 1;
        for child in self.nodes[id.0].children.clone() {
            if self.nodes[child.0].kind() != Some(ElementKind::ListItem) {
                self.visit(child);
                continue;
            }

            let start = self.text.len();
            let start_without_form_controls = self.text_without_form_controls.len();
            let label = format!("{number}. ");
            self.text.append(&label);
            self.text_without_form_controls.append(&label);
            number += 1;

            self.visit(child);
            let node = &mut self.nodes[child.0];
            if let Some(spot) = node.position.as_mut() {
                spot.start = start;
            }
            if let Some(spot) = node.position_without_form_controls.as_mut() {
                spot.start = start_without_form_controls;
            }
        }

        self.blank_both();
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.node(node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    fn text_before_control(&self, node: NodeId, start: usize, skip_ancestors: bool) -> Option<String> {
        let spot = self.position(node)?;
        let order_position = *self.order_positions.get(&node)?;
        let current_form = self.node(node)?.form;

        let mut from = 0;
        for &previous in self.order[..order_position].iter().rev() {
            if skip_ancestors && self.is_ancestor(previous, node) {
                continue;
            }
            let Some(previous_node) = self.node(previous) else {
                continue;
            };
            let Some(kind) = previous_node.kind() else {
                continue;
            };
            let Some(previous_spot) = previous_node.position else {
                continue;
            };

            if kind == ElementKind::Body {
                from = previous_spot.start;
                break;
            }
            if kind.is_submittable() {
                from = previous_spot.end;
                let text = self.text.substring(from.max(start), spot.start);
                if !text.is_empty() {
                    return Some(text);
                }
            }
            if previous_node.form.is_some() && previous_node.form != current_form {
                from = previous_spot.end;
                break;
            }
        }

        Some(self.text.substring(from.max(start), spot.start))
    }

    fn layout_of_cell(&self, cell: NodeId) -> Option<&TableLayout> {
        let row = self.enclosing_row(cell)?;
        let table = self.enclosing_table(row)?;
        self.tables.get(&table)
    }

    fn find_ancestor(&self, node: NodeId, kind: ElementKind, inclusive: bool) -> Option<NodeId> {
        let mut current = if inclusive {
            Some(node)
        } else {
            self.node(node)?.parent
        };
        while let Some(id) = current {
            let candidate = self.node(id)?;
            if candidate.kind() == Some(kind) {
                return Some(id);
            }
            current = candidate.parent;
        }
        None
    }
}

impl TextIndex for DocumentIndex {
    fn text(&self) -> &str {
        &self.rendered
    }

    fn position(&self, node: NodeId) -> Option<FindSpot> {
        self.node(node)?.position
    }

    fn text_before(&self, node: NodeId) -> Option<String> {
        let spot = self.position(node)?;
        Some(self.text.substring(0, spot.start))
    }

    fn as_text(&self, node: NodeId) -> Option<String> {
        let spot = self.position(node)?;
        Some(self.text.substring(spot.start, spot.end))
    }

    fn as_text_without_form_controls(&self, node: NodeId) -> Option<String> {
        let spot = self.node(node)?.position_without_form_controls?;
        Some(self.text_without_form_controls.substring(spot.start, spot.end))
    }

    fn label_text_before(&self, node: NodeId, start: usize) -> Option<String> {
        self.text_before_control(node, start, false)
    }

    fn labeling_text_before(&self, node: NodeId, start: usize) -> Option<String> {
        self.text_before_control(node, start, true)
    }

    fn label_text_after(&self, node: NodeId) -> Option<String> {
        let spot = self.position(node)?;
        let order_position = *self.order_positions.get(&node)?;
        let current_form = self.node(node)?.form;

        let mut end = self.text.len();
        for &next in &self.order[order_position + 1..] {
            let Some(next_node) = self.node(next) else {
                continue;
            };
            let (Some(kind), Some(next_spot)) = (next_node.kind(), next_node.position) else {
                continue;
            };
            if kind.is_submittable() {
                end = next_spot.start;
                break;
            }
            if current_form.is_some() && next_node.form != current_form {
                end = next_spot.start;
                break;
            }
        }

        Some(self.text.substring(spot.end, end))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)?.attribute(name)
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.data {
            NodeData::Element { tag, .. } => Some(tag.as_str()),
            NodeData::Text(_) => None,
        }
    }

    fn kind(&self, node: NodeId) -> Option<ElementKind> {
        self.node(node)?.kind()
    }

    fn is_displayed(&self, node: NodeId) -> bool {
        self.node(node).map_or(false, |n| n.displayed)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = match self.node(node) {
            Some(n) => n.children.iter().rev().copied().collect(),
            None => return result,
        };
        while let Some(id) = stack.pop() {
            if let Some(n) = self.node(id) {
                if n.kind().is_some() {
                    result.push(id);
                }
                stack.extend(n.children.iter().rev().copied());
            }
        }
        result
    }

    fn visible_elements(&self) -> &[NodeId] {
        &self.visible_elements
    }

    fn enclosing_cell(&self, node: NodeId) -> Option<NodeId> {
        self.find_ancestor(node, ElementKind::TableCell, true)
    }

    fn enclosing_row(&self, node: NodeId) -> Option<NodeId> {
        self.find_ancestor(node, ElementKind::TableRow, false)
    }

    fn enclosing_table(&self, node: NodeId) -> Option<NodeId> {
        self.find_ancestor(node, ElementKind::Table, false)
    }

    fn cell_index_in_row(&self, cell: NodeId) -> Option<usize> {
        self.layout_of_cell(cell)?.origin(cell).map(|(_, col)| col)
    }

    fn spans_past_edge(&self, cell: NodeId) -> bool {
        self.layout_of_cell(cell)
            .is_some_and(|layout| layout.spans_past_edge(cell))
    }

    fn row_index_in_table(&self, row: NodeId) -> Option<usize> {
        let table = self.enclosing_table(row)?;
        self.tables.get(&table)?.row_index(row)
    }

    fn row_count(&self, table: NodeId) -> usize {
        self.tables.get(&table).map_or(0, TableLayout::row_count)
    }

    fn column_count(&self, table: NodeId) -> usize {
        self.tables.get(&table).map_or(0, TableLayout::column_count)
    }

    fn row_cells(&self, table: NodeId, row: usize) -> Vec<NodeId> {
        self.tables
            .get(&table)
            .map(|layout| layout.row_cells(row).to_vec())
            .unwrap_or_default()
    }

    fn cell_at(&self, table: NodeId, row: usize, col: usize) -> Option<NodeId> {
        self.tables.get(&table)?.cell_at(row, col)
    }
}
