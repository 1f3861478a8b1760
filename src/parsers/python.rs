use std::cell::RefCell;
use tree_sitter::{Language, Node as TSNode, Tree};

use super::common::{extract_text, find_child_by_kind, TreeSitterParser};
use super::{LanguageParser, ModuleSyntax, RawImport};
use crate::core::error::Result;
use crate::core::{ClassDef, Definitions};

// One parser per worker thread, built on first use.
thread_local! {
    static PARSER: RefCell<Option<TreeSitterParser>> = RefCell::new(None);
}

/// Tab stops of 8 and of 1 columns. Indentation must compare the same way
/// under both, otherwise Python 3 raises `TabError`.
const TAB_SIZE: usize = 8;

pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    pub fn new() -> Result<Self> {
        let language = tree_sitter_python::language();
        // Fail at construction rather than on the first file.
        TreeSitterParser::new(language)?;
        Ok(Self { language })
    }

    /// Parse `source` as Python 3. Trees with error nodes, Python 2 only
    /// statements or inconsistent tab/space indentation are rejected.
    fn parse(&self, source: &str) -> Option<Tree> {
        let tree = PARSER.with(|cell| {
            let mut slot = cell.try_borrow_mut().ok()?;
            if slot.is_none() {
                *slot = TreeSitterParser::new(self.language).ok();
            }
            slot.as_mut()?.parse_strict(source)
        })?;
        is_python3(&tree, source.as_bytes()).then_some(tree)
    }

    fn process_class(&self, class_node: &TSNode, source: &[u8]) -> Option<ClassDef> {
        let name = class_node.child_by_field_name("name")?;
        let mut class = ClassDef::new(extract_text(&name, source));

        if let Some(body) = class_node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for child in body.children(&mut cursor) {
                let child = unwrap_decorated(child);
                if is_plain_function(&child) {
                    if let Some(method_name) = child.child_by_field_name("name") {
                        class.methods.push(extract_text(&method_name, source).to_string());
                    }
                }
            }
        }

        Some(class)
    }

    fn collect_assignment_targets(
        &self,
        statement: &TSNode,
        source: &[u8],
        definitions: &mut Definitions,
    ) {
        let mut cursor = statement.walk();
        for child in statement.named_children(&mut cursor) {
            if child.kind() == "assignment" {
                self.process_assignment(&child, source, definitions);
            }
        }
    }

    fn process_assignment(&self, assignment: &TSNode, source: &[u8], definitions: &mut Definitions) {
        // `x: int = 1` is an annotated assignment, not a plain one.
        if assignment.child_by_field_name("type").is_some() {
            return;
        }

        if let Some(left) = assignment.child_by_field_name("left") {
            if left.kind() == "identifier" {
                definitions
                    .variables
                    .insert(extract_text(&left, source).to_string());
            }
        }

        // a = b = 1
        if let Some(right) = assignment.child_by_field_name("right") {
            if right.kind() == "assignment" {
                self.process_assignment(&right, source, definitions);
            }
        }
    }

    fn process_import(&self, import_node: &TSNode, source: &[u8]) -> Vec<RawImport> {
        let mut cursor = import_node.walk();
        let imports: Vec<RawImport> = import_node
            .children_by_field_name("name", &mut cursor)
            .filter_map(|name| imported_name(&name, source))
            .map(RawImport::absolute)
            .collect();
        imports
    }

    fn process_import_from(&self, import_node: &TSNode, source: &[u8]) -> Option<RawImport> {
        let module_node = import_node.child_by_field_name("module_name")?;
        let (module, level) = match module_node.kind() {
            "relative_import" => {
                let level = find_child_by_kind(&module_node, "import_prefix")
                    .map(|prefix| extract_text(&prefix, source).matches('.').count())
                    .unwrap_or(0);
                let module = find_child_by_kind(&module_node, "dotted_name")
                    .map(|dotted| extract_text(&dotted, source).to_string())
                    .unwrap_or_default();
                (module, level)
            }
            _ => (extract_text(&module_node, source).to_string(), 0),
        };

        let mut cursor = import_node.walk();
        let names: Vec<String> = import_node
            .children_by_field_name("name", &mut cursor)
            .filter_map(|name| imported_name(&name, source))
            .collect();

        Some(RawImport {
            module,
            level,
            names,
        })
    }
}

impl LanguageParser for PythonParser {
    fn extract_module(&self, source: &str) -> Option<ModuleSyntax> {
        let tree = self.parse(source)?;
        let source_bytes = source.as_bytes();
        let root = tree.root_node();

        let mut module = ModuleSyntax::default();
        let mut cursor = root.walk();
        for statement in root.children(&mut cursor) {
            let statement = unwrap_decorated(statement);
            match statement.kind() {
                "class_definition" => {
                    if let Some(class) = self.process_class(&statement, source_bytes) {
                        module.definitions.classes.push(class);
                    }
                }
                "function_definition" if is_plain_function(&statement) => {
                    if let Some(name) = statement.child_by_field_name("name") {
                        module
                            .definitions
                            .functions
                            .insert(extract_text(&name, source_bytes).to_string());
                    }
                }
                "expression_statement" => {
                    self.collect_assignment_targets(
                        &statement,
                        source_bytes,
                        &mut module.definitions,
                    );
                }
                "import_statement" => {
                    module
                        .imports
                        .extend(self.process_import(&statement, source_bytes));
                }
                "import_from_statement" => {
                    module
                        .imports
                        .extend(self.process_import_from(&statement, source_bytes));
                }
                _ => {}
            }
        }

        Some(module)
    }

    fn extract_usages(&self, source: &str) -> Vec<String> {
        let Some(tree) = self.parse(source) else {
            return Vec::new();
        };
        let source_bytes = source.as_bytes();

        let mut usages = Vec::new();
        let mut stack = vec![tree.root_node()];
        while let Some(node) = stack.pop() {
            if node.kind() == "call" {
                if let Some(name) = called_name(&node, source_bytes) {
                    usages.push(name.to_string());
                }
            }

            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            // Reversed so calls come out in source order.
            stack.extend(children.into_iter().rev());
        }

        usages
    }

    fn language_name(&self) -> &str {
        "python"
    }
}

fn unwrap_decorated(node: TSNode) -> TSNode {
    if node.kind() == "decorated_definition" {
        node.child_by_field_name("definition").unwrap_or(node)
    } else {
        node
    }
}

/// `def` statements only; `async def` is a different statement kind.
fn is_plain_function(node: &TSNode) -> bool {
    node.kind() == "function_definition" && find_child_by_kind(node, "async").is_none()
}

fn is_python3(tree: &Tree, source: &[u8]) -> bool {
    let mut stack = vec![tree.root_node()];
    while let Some(node) = stack.pop() {
        let rejected = match node.kind() {
            "exec_statement" => true,
            // `print >>f, x` still reads as a shift expression in Python 3.
            "print_statement" => find_child_by_kind(&node, "chevron").is_none(),
            // except E, e:
            "except_clause" => find_child_by_kind(&node, ",").is_some(),
            "block" => !block_indentation_is_consistent(&node, source),
            _ => false,
        };
        if rejected {
            return false;
        }

        let mut cursor = node.walk();
        stack.extend(node.named_children(&mut cursor));
    }
    true
}

/// Statements of a block sit deeper than the statement owning the block and
/// level with each other, under both tab sizes.
fn block_indentation_is_consistent(block: &TSNode, source: &[u8]) -> bool {
    let Some(owner) = block.parent().and_then(|parent| indentation(&parent, source)) else {
        return true;
    };

    let mut level = None;
    let mut cursor = block.walk();
    for statement in block.named_children(&mut cursor) {
        if statement.kind() == "comment" {
            continue;
        }
        let Some(indent) = indentation(&statement, source) else {
            continue;
        };
        match level {
            None => {
                if indent.0 <= owner.0 || indent.1 <= owner.1 {
                    return false;
                }
                level = Some(indent);
            }
            Some(expected) if expected != indent => return false,
            Some(_) => {}
        }
    }
    true
}

/// Column of `node` measured with tab stops of 8 and of 1, or `None` when
/// anything but whitespace precedes it on its line.
fn indentation(node: &TSNode, source: &[u8]) -> Option<(usize, usize)> {
    let start = node.start_byte();
    let line_start = source[..start]
        .iter()
        .rposition(|&byte| byte == b'\n')
        .map_or(0, |newline| newline + 1);

    let (mut wide, mut narrow) = (0, 0);
    for &byte in &source[line_start..start] {
        match byte {
            b' ' => {
                wide += 1;
                narrow += 1;
            }
            b'\t' => {
                wide = (wide / TAB_SIZE + 1) * TAB_SIZE;
                narrow += 1;
            }
            // form feed resets the column
            b'\x0c' => {
                wide = 0;
                narrow = 0;
            }
            _ => return None,
        }
    }
    Some((wide, narrow))
}

/// `f(...)` -> `f`, `obj.attr.m(...)` -> `m`. Any other callee has no name.
fn called_name<'a>(call: &TSNode, source: &'a [u8]) -> Option<&'a str> {
    let function = call.child_by_field_name("function")?;
    let name_node = match function.kind() {
        "identifier" => function,
        "attribute" => function.child_by_field_name("attribute")?,
        _ => return None,
    };
    let name = extract_text(&name_node, source);
    (!name.is_empty()).then_some(name)
}

fn imported_name(node: &TSNode, source: &[u8]) -> Option<String> {
    let dotted = match node.kind() {
        "dotted_name" => *node,
        "aliased_import" => node.child_by_field_name("name")?,
        _ => return None,
    };
    Some(extract_text(&dotted, source).to_string())
}
