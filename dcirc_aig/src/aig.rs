//! And-inverter graph arena.
//!
//! Nodes are stored in creation order, so every AND node refers only to nodes
//! with a smaller index and a single forward pass evaluates the graph. Node 0
//! is the constant false node.

use std::collections::HashMap;

/// Largest number of nodes a literal can address.
pub const MAX_NODES: usize = 1 << 31;

/// Variable for the node stored at index `len`, if a literal can address it.
fn var_at(len: usize) -> Option<u32> {
    u32::try_from(len).ok().filter(|var| *var <= u32::MAX >> 1)
}

/// A possibly complemented reference to a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit(u32);

impl Lit {
    /// Constant false.
    pub const FALSE: Self = Self(0);
    /// Constant true.
    pub const TRUE: Self = Self(1);

    /// Literal for node `var`, complemented when `negated`.
    #[must_use]
    pub const fn new(var: u32, negated: bool) -> Self {
        Self((var << 1) | negated as u32)
    }

    /// The constant literal for `value`.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::TRUE } else { Self::FALSE }
    }

    /// Index of the referenced node.
    #[must_use]
    pub const fn var(self) -> u32 {
        self.0 >> 1
    }

    /// Whether the reference is complemented.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        self.0 & 1 == 1
    }

    /// Whether the literal refers to the constant node.
    #[must_use]
    pub const fn is_const(self) -> bool {
        self.var() == 0
    }

    /// Complement the literal when `cond` holds.
    #[must_use]
    pub const fn negate_if(self, cond: bool) -> Self {
        Self(self.0 ^ cond as u32)
    }
}

impl std::ops::Not for Lit {
    type Output = Self;

    fn not(self) -> Self {
        Self(self.0 ^ 1)
    }
}

impl std::fmt::Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::FALSE => write!(f, "0"),
            Self::TRUE => write!(f, "1"),
            lit if lit.is_negated() => write!(f, "!n{}", lit.var()),
            lit => write!(f, "n{}", lit.var()),
        }
    }
}

/// A node of the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    /// The constant false node, always at index 0.
    Const,
    /// A free variable: an input bit or a latch's current-state bit.
    Leaf,
    /// Conjunction of two earlier literals.
    And(Lit, Lit),
}

/// Structurally hashed node arena.
#[derive(Clone, Debug)]
pub struct Aig {
    nodes: Vec<Node>,
    strash: HashMap<(Lit, Lit), Lit>,
}

impl Default for Aig {
    fn default() -> Self {
        Self::new()
    }
}

impl Aig {
    /// An arena holding only the constant node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Const],
            strash: HashMap::new(),
        }
    }

    /// Number of nodes, including the constant node.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node at index `var`.
    #[must_use]
    pub fn node(&self, var: u32) -> Option<Node> {
        self.nodes.get(var as usize).copied()
    }

    fn next_var(&self) -> u32 {
        match var_at(self.nodes.len()) {
            Some(var) => var,
            None => panic!("and-inverter graph is limited to {MAX_NODES} nodes"),
        }
    }

    /// Allocate a fresh leaf.
    ///
    /// # Panics
    ///
    /// When the arena already holds [`MAX_NODES`] nodes.
    pub fn leaf(&mut self) -> Lit {
        let lit = Lit::new(self.next_var(), false);
        self.nodes.push(Node::Leaf);
        lit
    }

    /// Allocate `width` fresh leaves.
    ///
    /// # Panics
    ///
    /// See [`Aig::leaf`].
    pub fn leaves(&mut self, width: usize) -> Vec<Lit> {
        (0..width).map(|_| self.leaf()).collect()
    }

    /// Conjunction, folding constants and reusing structurally equal nodes.
    ///
    /// # Panics
    ///
    /// When a new node is needed and the arena already holds [`MAX_NODES`]
    /// nodes.
    pub fn and(&mut self, a: Lit, b: Lit) -> Lit {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        if a == Lit::FALSE || a == !b {
            return Lit::FALSE;
        }
        if a == Lit::TRUE || a == b {
            return b;
        }
        if let Some(&lit) = self.strash.get(&(a, b)) {
            return lit;
        }
        let lit = Lit::new(self.next_var(), false);
        self.nodes.push(Node::And(a, b));
        self.strash.insert((a, b), lit);
        lit
    }

    /// Disjunction.
    pub fn or(&mut self, a: Lit, b: Lit) -> Lit {
        !self.and(!a, !b)
    }

    /// Exclusive or.
    pub fn xor(&mut self, a: Lit, b: Lit) -> Lit {
        let left = self.and(a, !b);
        let right = self.and(!a, b);
        self.or(left, right)
    }

    /// `sel ? then : otherwise`.
    pub fn mux(&mut self, sel: Lit, then: Lit, otherwise: Lit) -> Lit {
        let left = self.and(sel, then);
        let right = self.and(!sel, otherwise);
        self.or(left, right)
    }

    /// Evaluate every node given values for the leaves. Unbound leaves read
    /// as false.
    #[must_use]
    pub fn evaluate(&self, leaves: &HashMap<u32, bool>) -> Vec<bool> {
        let mut values = Vec::with_capacity(self.nodes.len());
        for (var, node) in self.nodes.iter().enumerate() {
            let value = match *node {
                Node::Const => false,
                Node::Leaf => u32::try_from(var)
                    .ok()
                    .and_then(|var| leaves.get(&var).copied())
                    .unwrap_or(false),
                Node::And(a, b) => lit_value(&values, a) && lit_value(&values, b),
            };
            values.push(value);
        }
        values
    }

    /// Copy every node of `src` into this arena.
    ///
    /// Leaves of `src` listed in `subst` are replaced by the given literal;
    /// all other leaves become fresh leaves here. Returns the translation
    /// table from `src` node index to literal in `self`.
    pub fn import(&mut self, src: &Self, subst: &HashMap<u32, Lit>) -> Vec<Lit> {
        let mut map = Vec::with_capacity(src.nodes.len());
        for (var, node) in src.nodes.iter().enumerate() {
            let lit = match *node {
                Node::Const => Lit::FALSE,
                Node::Leaf => match u32::try_from(var).ok().and_then(|var| subst.get(&var)) {
                    Some(&lit) => lit,
                    None => self.leaf(),
                },
                Node::And(a, b) => {
                    let a = translate(&map, a);
                    let b = translate(&map, b);
                    self.and(a, b)
                }
            };
            map.push(lit);
        }
        map
    }
}

/// Value of `lit` in a table produced by [`Aig::evaluate`].
#[must_use]
pub fn lit_value(values: &[bool], lit: Lit) -> bool {
    values[lit.var() as usize] ^ lit.is_negated()
}

/// Translate `lit` through a table produced by [`Aig::import`].
#[must_use]
pub fn translate(map: &[Lit], lit: Lit) -> Lit {
    map[lit.var() as usize].negate_if(lit.is_negated())
}
