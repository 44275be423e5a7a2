//! Page hierarchy
//!
//! Pages live in an arena owned by [`PageTree`]. A [`NodeId`] is the index of
//! a node in that arena; parents are referenced by id and only used for upward
//! lookups, children are kept in declaration order.
//!
//! # Key Types
//!
//! - [`PageTree`] - the arena, with root access and name lookup
//! - [`PageNode`] - one page: name, parent, ordered children
//! - [`RenderContext`] - the tree viewed from the page currently being rendered
//!
//! ```rust,ignore
//! use html_sitegen::tree::PageTree;
//!
//! let mut tree = PageTree::from_root("index");
//! let about = tree.add_child(tree.root(), "about")?;
//! assert_eq!(tree.parent(about), Some(tree.root()));
//! assert_eq!(tree.find("about"), Some(about));
//! ```

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Index of a page in its [`PageTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One page of the site
#[derive(Debug, Clone)]
pub struct PageNode {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl PageNode {
    /// Unique page name, also used as the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Reference used by links to this page
    pub fn href(&self) -> String {
        format!("{}.html", self.name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Rooted, acyclic tree of pages with unique names
#[derive(Debug, Clone)]
pub struct PageTree {
    nodes: Vec<PageNode>,
    by_name: IndexMap<String, NodeId>,
}

impl PageTree {
    /// Create a tree holding only its root page
    pub fn from_root<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        let mut by_name = IndexMap::new();
        by_name.insert(name.clone(), NodeId(0));
        Self {
            nodes: vec![PageNode {
                name,
                parent: None,
                children: Vec::new(),
            }],
            by_name,
        }
    }

    /// Append a page as the last child of `parent`
    ///
    /// Fails when the name is empty or already used anywhere in the tree.
    pub fn add_child<S: Into<String>>(&mut self, parent: NodeId, name: S) -> Result<NodeId> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::layout_static("Page name must not be empty"));
        }
        if self.by_name.contains_key(&name) {
            return Err(Error::layout_owned(format!("Duplicate page name '{}'", name)));
        }
        if parent.0 >= self.nodes.len() {
            return Err(Error::layout_owned(format!(
                "Parent {} does not exist",
                parent.0
            )));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(PageNode {
            name: name.clone(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        self.by_name.insert(name, id);
        Ok(id)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Access a node by id
    ///
    /// Ids are only handed out by this tree, so an id from another tree is a
    /// programming error and panics.
    pub fn get(&self, id: NodeId) -> &PageNode {
        &self.nodes[id.0]
    }

    /// Look up a page by name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.get(id).name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Number of edges between the root and `id`
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Whether `ancestor` lies strictly above `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Every page in breadth-first order, starting at the root
    pub fn breadth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([self.root()]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.children(id).iter().copied());
        }
        order
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Page names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }
}

/// The page tree seen from the page currently being rendered
///
/// Built once per visited page and handed to every built-in function, so the
/// functions never depend on shared mutable state.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    tree: &'a PageTree,
    current: NodeId,
}

impl<'a> RenderContext<'a> {
    pub fn new(tree: &'a PageTree, current: NodeId) -> Self {
        Self { tree, current }
    }

    /// Context for the page with the given name, if it exists
    pub fn for_page(tree: &'a PageTree, name: &str) -> Option<Self> {
        tree.find(name).map(|current| Self::new(tree, current))
    }

    pub fn tree(&self) -> &'a PageTree {
        self.tree
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn current_page(&self) -> &'a PageNode {
        self.tree.get(self.current)
    }
}
