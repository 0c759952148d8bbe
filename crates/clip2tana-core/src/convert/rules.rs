//! Tag handlers that give html2md the Tana paste style.
//!
//! Anchors and images resolve their reference against the page URL. Headings
//! are always ATX, rules are `---`, bullet-list items carry no marker,
//! ordered items are numbered `N.  `, and both emphasis and strong use a
//! single `*`. A block element with no content renders as a blank line.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use html2md::codes::CodeHandler;
use html2md::common::get_tag_attr;
use html2md::containers::ContainerHandler;
use html2md::paragraphs::ParagraphHandler;
use html2md::{Handle, NodeData, StructuredPrinter, TagHandler, TagHandlerFactory};
use url::Url;

use super::ConvertError;

/// First reference failure recorded during a walk.
pub(super) type FailureSlot = Rc<RefCell<Option<ConvertError>>>;

pub(super) type Rules = HashMap<String, Box<dyn TagHandlerFactory>>;

/// Open lists, innermost last: `None` for bullet lists, `Some(start)` for ordered ones.
type ListStack = Rc<RefCell<Vec<Option<u64>>>>;

/// Void elements; a block holding one of these is not blank.
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements that carry meaning even without text.
const MEANINGFUL_WHEN_BLANK: &[&str] = &[
    "a", "table", "thead", "tbody", "tfoot", "th", "td", "iframe", "script", "audio", "video",
];

/// Builds the handler table for one conversion.
pub(super) fn paste_rules(base: &Url, failure: &FailureSlot) -> Rules {
    let base = Rc::new(base.clone());
    let lists = ListStack::default();
    let mut rules: Rules = HashMap::new();

    for kind in [Reference::Anchor, Reference::Image] {
        rules.insert(
            kind.tag().to_string(),
            Box::new(ReferenceFactory {
                kind,
                base: Rc::clone(&base),
                failure: Rc::clone(failure),
            }),
        );
    }

    for level in 1..=6 {
        rules.insert(
            format!("h{level}"),
            blank_aware(Fixed::new(Block::Heading(level), &lists)),
        );
    }
    rules.insert("hr".into(), Box::new(Fixed::new(Block::Rule, &lists)));
    rules.insert("ul".into(), blank_aware(Fixed::new(Block::BulletList, &lists)));
    rules.insert("ol".into(), blank_aware(Fixed::new(Block::OrderedList, &lists)));
    rules.insert("li".into(), blank_aware(Fixed::new(Block::ListItem, &lists)));
    rules.insert("blockquote".into(), blank_aware(Fixed::new(Block::Quote, &lists)));
    for tag in ["em", "i", "strong", "b"] {
        rules.insert(tag.into(), Box::new(Fixed::new(Block::Emphasis, &lists)));
    }

    rules.insert("p".into(), blank_aware(ParagraphHandler::default));
    rules.insert("pre".into(), blank_aware(CodeHandler::default));
    for tag in ["div", "section", "header", "footer"] {
        rules.insert(tag.into(), blank_aware(ContainerHandler::default));
    }

    rules
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reference {
    Anchor,
    Image,
}

impl Reference {
    fn tag(self) -> &'static str {
        match self {
            Reference::Anchor => "a",
            Reference::Image => "img",
        }
    }

    fn attribute(self) -> &'static str {
        match self {
            Reference::Anchor => "href",
            Reference::Image => "src",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Reference::Anchor => "[",
            Reference::Image => "![",
        }
    }
}

/// Resolves the element's reference attribute against `base`.
fn resolve(kind: Reference, tag: &Handle, base: &Url) -> Result<Url, ConvertError> {
    let reference = get_tag_attr(tag, kind.attribute()).ok_or(ConvertError::MissingReference {
        tag: kind.tag(),
        attribute: kind.attribute(),
    })?;
    base.join(&reference)
        .map_err(|source| ConvertError::UnresolvableReference {
            tag: kind.tag(),
            reference,
            source,
        })
}

struct ReferenceFactory {
    kind: Reference,
    base: Rc<Url>,
    failure: FailureSlot,
}

impl TagHandlerFactory for ReferenceFactory {
    fn instantiate(&self) -> Box<dyn TagHandler> {
        Box::new(ReferenceHandler {
            kind: self.kind,
            base: Rc::clone(&self.base),
            failure: Rc::clone(&self.failure),
            start_pos: 0,
            target: None,
        })
    }
}

/// Renders `[content](url)` / `![content](url)`, including for empty anchors.
struct ReferenceHandler {
    kind: Reference,
    base: Rc<Url>,
    failure: FailureSlot,
    start_pos: usize,
    target: Option<Result<Url, ConvertError>>,
}

impl ReferenceHandler {
    fn record(&self, err: ConvertError) {
        let mut slot = self.failure.borrow_mut();
        if slot.is_none() {
            tracing::debug!("reference resolution failed: {err}");
            *slot = Some(err);
        }
    }
}

impl TagHandler for ReferenceHandler {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        self.start_pos = printer.data.len();
        self.target = Some(resolve(self.kind, tag, &self.base));
    }

    fn after_handle(&mut self, printer: &mut StructuredPrinter) {
        match self.target.take() {
            Some(Ok(url)) => {
                printer.data.insert_str(self.start_pos, self.kind.prefix());
                printer.append_str(&format!("]({url})"));
            }
            Some(Err(err)) => self.record(err),
            None => {}
        }
    }
}

/// True when `node` has no text and no void or meaningful-when-blank descendant.
fn is_blank(node: &Handle) -> bool {
    node.children.borrow().iter().all(|child| match child.data {
        NodeData::Text { ref contents } => contents.borrow().trim().is_empty(),
        NodeData::Element { ref name, .. } => {
            let tag = &*name.local;
            !VOID.contains(&tag) && !MEANINGFUL_WHEN_BLANK.contains(&tag) && is_blank(child)
        }
        _ => true,
    })
}

fn blank_aware<F>(inner: F) -> Box<dyn TagHandlerFactory>
where
    F: TagHandlerFactory + 'static,
{
    Box::new(BlankAwareFactory(Box::new(inner)))
}

struct BlankAwareFactory(Box<dyn TagHandlerFactory>);

impl TagHandlerFactory for BlankAwareFactory {
    fn instantiate(&self) -> Box<dyn TagHandler> {
        Box::new(BlankAware {
            inner: self.0.instantiate(),
            blank: false,
        })
    }
}

/// Replaces an empty block element with a blank line, otherwise defers to `inner`.
struct BlankAware {
    inner: Box<dyn TagHandler>,
    blank: bool,
}

impl TagHandler for BlankAware {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        self.blank = is_blank(tag);
        if !self.blank {
            self.inner.handle(tag, printer);
        }
    }

    fn after_handle(&mut self, printer: &mut StructuredPrinter) {
        if self.blank {
            printer.append_str("\n\n");
        } else {
            self.inner.after_handle(printer);
        }
    }

    fn skip_descendants(&self) -> bool {
        self.blank || self.inner.skip_descendants()
    }
}

/// Fixed-shape handlers; only lists share state, for item numbering.
#[derive(Debug, Clone, Copy)]
enum Block {
    Heading(usize),
    Rule,
    BulletList,
    OrderedList,
    ListItem,
    Quote,
    Emphasis,
}

struct Fixed {
    block: Block,
    lists: ListStack,
}

impl Fixed {
    fn new(block: Block, lists: &ListStack) -> Self {
        Self {
            block,
            lists: Rc::clone(lists),
        }
    }
}

impl TagHandlerFactory for Fixed {
    fn instantiate(&self) -> Box<dyn TagHandler> {
        Box::new(BlockHandler {
            block: self.block,
            lists: Rc::clone(&self.lists),
            start_pos: 0,
        })
    }
}

struct BlockHandler {
    block: Block,
    lists: ListStack,
    start_pos: usize,
}

fn start_line(printer: &mut StructuredPrinter) {
    if !printer.data.is_empty() && !printer.data.ends_with('\n') {
        printer.insert_newline();
    }
}

fn blank_line(printer: &mut StructuredPrinter) {
    start_line(printer);
    printer.insert_newline();
}

/// Number for the item about to be printed, counting the `li` siblings before it.
fn item_number(start: u64, printer: &StructuredPrinter) -> u64 {
    let earlier = printer
        .siblings
        .get(&printer.parent_chain.len())
        .map_or(0, |tags| tags.iter().filter(|t| *t == "li").count());
    start + earlier as u64
}

impl TagHandler for BlockHandler {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        match self.block {
            Block::Heading(level) => {
                blank_line(printer);
                printer.append_str(&"#".repeat(level));
                printer.append_str(" ");
            }
            Block::Rule => {
                blank_line(printer);
                printer.append_str("---");
                blank_line(printer);
            }
            Block::BulletList => {
                self.lists.borrow_mut().push(None);
                start_line(printer);
            }
            Block::OrderedList => {
                let start = get_tag_attr(tag, "start")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(1);
                self.lists.borrow_mut().push(Some(start));
                start_line(printer);
            }
            Block::ListItem => {
                start_line(printer);
                let innermost = self.lists.borrow().last().copied().flatten();
                if let Some(start) = innermost {
                    printer.append_str(&format!("{}.  ", item_number(start, printer)));
                }
            }
            Block::Quote => {
                blank_line(printer);
                self.start_pos = printer.data.len();
            }
            Block::Emphasis => {
                self.start_pos = printer.data.len();
                printer.append_str("*");
            }
        }
    }

    fn after_handle(&mut self, printer: &mut StructuredPrinter) {
        match self.block {
            Block::Heading(_) => blank_line(printer),
            Block::Rule => {}
            Block::BulletList | Block::OrderedList => {
                self.lists.borrow_mut().pop();
                start_line(printer);
            }
            Block::ListItem => start_line(printer),
            Block::Quote => {
                let mut quoted: Vec<String> = Vec::new();
                let mut previous_empty = false;
                for line in printer.data[self.start_pos..].trim_matches('\n').split('\n') {
                    let empty = line.trim().is_empty();
                    if !(empty && previous_empty) {
                        quoted.push(format!("> {line}"));
                    }
                    previous_empty = empty;
                }
                printer.data.truncate(self.start_pos);
                printer.append_str(&quoted.join("\n"));
                blank_line(printer);
            }
            Block::Emphasis => {
                if printer.data[self.start_pos + 1..].trim().is_empty() {
                    printer.data.truncate(self.start_pos);
                } else {
                    printer.append_str("*");
                }
            }
        }
    }

    fn skip_descendants(&self) -> bool {
        matches!(self.block, Block::Rule)
    }
}
