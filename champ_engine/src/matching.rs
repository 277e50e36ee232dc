//! Maximum-weight matching on general graphs.
//!
//! Edmonds' blossom algorithm with dual variables, O(n³). With integer edge
//! weights every intermediate value stays integral. When `max_cardinality` is
//! set the result is the heaviest matching among those with the most edges,
//! which is how Swiss rounds get as many games as the history allows.
//!
//! Internally every edge `k` has two endpoints, `2k` and `2k + 1`; endpoint
//! `p` belongs to vertex `endpoint[p]` and its partner endpoint is `p ^ 1`.
//! Blossom ids are `n..2n`, vertex ids double as trivial blossoms.

/// Undirected weighted edge `(u, v, weight)`
pub type WeightedEdge = (usize, usize, i64);

const FREE: u8 = 0;
const S: u8 = 1;
const T: u8 = 2;
const BREADCRUMB: u8 = 4;

/// Compute a maximum-weight matching.
///
/// Returns `mate`, where `mate[v]` is the vertex matched to `v`. Edges
/// touching a vertex `>= vertex_count` and self-loops are ignored.
pub fn max_weight_matching(
    vertex_count: usize,
    edges: &[WeightedEdge],
    max_cardinality: bool,
) -> Vec<Option<usize>> {
    let edges: Vec<WeightedEdge> = edges
        .iter()
        .copied()
        .filter(|&(u, v, _)| u != v && u < vertex_count && v < vertex_count)
        .collect();
    if edges.is_empty() {
        return vec![None; vertex_count];
    }

    let mut matcher = Matcher::new(vertex_count, edges);
    matcher.solve(max_cardinality);
    matcher.mates()
}

/// Matched pairs `(u, v)` with `u < v`, ordered by `u`
pub fn matched_pairs(mate: &[Option<usize>]) -> Vec<(usize, usize)> {
    mate.iter()
        .enumerate()
        .filter_map(|(u, &m)| m.filter(|&v| u < v).map(|v| (u, v)))
        .collect()
}

/// Which dual adjustment bounds the next step of a stage
enum Delta {
    /// No further augmentation possible
    Vertex,
    /// Edge between an S vertex and a free vertex became tight
    FreeEdge(usize),
    /// Edge between two S blossoms became tight
    SEdge(usize),
    /// T blossom dual reached zero, expand it
    Expand(usize),
}

struct Matcher {
    n: usize,
    edges: Vec<WeightedEdge>,
    endpoint: Vec<usize>,
    neighbend: Vec<Vec<usize>>,
    mate: Vec<Option<usize>>,
    label: Vec<u8>,
    labelend: Vec<Option<usize>>,
    inblossom: Vec<usize>,
    blossomparent: Vec<Option<usize>>,
    blossomchilds: Vec<Vec<usize>>,
    blossombase: Vec<Option<usize>>,
    blossomendps: Vec<Vec<usize>>,
    bestedge: Vec<Option<usize>>,
    blossombestedges: Vec<Option<Vec<usize>>>,
    unusedblossoms: Vec<usize>,
    dualvar: Vec<i64>,
    allowedge: Vec<bool>,
    queue: Vec<usize>,
}

impl Matcher {
    fn new(n: usize, edges: Vec<WeightedEdge>) -> Self {
        let maxweight = edges.iter().map(|&(_, _, w)| w).max().unwrap_or(0).max(0);

        let mut endpoint = Vec::with_capacity(2 * edges.len());
        let mut neighbend = vec![Vec::new(); n];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            endpoint.push(i);
            endpoint.push(j);
            neighbend[i].push(2 * k + 1);
            neighbend[j].push(2 * k);
        }

        let mut blossombase: Vec<Option<usize>> = (0..n).map(Some).collect();
        blossombase.extend(std::iter::repeat_n(None, n));

        let mut dualvar = vec![maxweight; n];
        dualvar.extend(std::iter::repeat_n(0, n));

        let edge_count = edges.len();
        Self {
            n,
            edges,
            endpoint,
            neighbend,
            mate: vec![None; n],
            label: vec![FREE; 2 * n],
            labelend: vec![None; 2 * n],
            inblossom: (0..n).collect(),
            blossomparent: vec![None; 2 * n],
            blossomchilds: vec![Vec::new(); 2 * n],
            blossombase,
            blossomendps: vec![Vec::new(); 2 * n],
            bestedge: vec![None; 2 * n],
            blossombestedges: vec![None; 2 * n],
            unusedblossoms: (n..2 * n).collect(),
            dualvar,
            allowedge: vec![false; edge_count],
            queue: Vec::new(),
        }
    }

    fn slack(&self, k: usize) -> i64 {
        let (i, j, w) = self.edges[k];
        self.dualvar[i] + self.dualvar[j] - 2 * w
    }

    fn blossom_leaves(&self, b: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![b];
        while let Some(t) = stack.pop() {
            if t < self.n {
                leaves.push(t);
            } else {
                stack.extend(self.blossomchilds[t].iter().rev());
            }
        }
        leaves
    }

    /// Label the top-level blossom containing `w` and, for T, its mate's blossom
    fn assign_label(&mut self, w: usize, t: u8, p: Option<usize>) {
        let b = self.inblossom[w];
        self.label[w] = t;
        self.label[b] = t;
        self.labelend[w] = p;
        self.labelend[b] = p;
        self.bestedge[w] = None;
        self.bestedge[b] = None;
        if t == S {
            let leaves = self.blossom_leaves(b);
            self.queue.extend(leaves);
        } else if t == T {
            if let Some(m) = self.blossombase[b].and_then(|base| self.mate[base]) {
                let next = self.endpoint[m];
                self.assign_label(next, S, Some(m ^ 1));
            }
        }
    }

    /// Trace back from `v` and `w` to find a new blossom's base, or `None`
    /// if the two alternating paths reach different roots.
    fn scan_blossom(&mut self, v: usize, w: usize) -> Option<usize> {
        let mut path = Vec::new();
        let mut base = None;
        let mut v = Some(v);
        let mut w = Some(w);
        while let Some(cur) = v {
            let b = self.inblossom[cur];
            if self.label[b] & BREADCRUMB != 0 {
                base = self.blossombase[b];
                break;
            }
            path.push(b);
            self.label[b] = S | BREADCRUMB;
            v = self.labelend[b].and_then(|p| {
                let bt = self.inblossom[self.endpoint[p]];
                self.labelend[bt].map(|q| self.endpoint[q])
            });
            if w.is_some() {
                std::mem::swap(&mut v, &mut w);
            }
        }
        for b in path {
            self.label[b] = S;
        }
        base
    }

    /// Build a blossom with the given base through S-S edge `k`
    fn add_blossom(&mut self, base: usize, k: usize) {
        let (v, w, _) = self.edges[k];
        let bb = self.inblossom[base];
        let mut bv = self.inblossom[v];
        let mut bw = self.inblossom[w];
        let Some(b) = self.unusedblossoms.pop() else {
            return;
        };
        self.blossombase[b] = Some(base);
        self.blossomparent[b] = None;
        self.blossomparent[bb] = Some(b);

        let mut path = Vec::new();
        let mut endps = Vec::new();
        while bv != bb {
            self.blossomparent[bv] = Some(b);
            path.push(bv);
            let Some(le) = self.labelend[bv] else { break };
            endps.push(le);
            bv = self.inblossom[self.endpoint[le]];
        }
        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.blossomparent[bw] = Some(b);
            path.push(bw);
            let Some(le) = self.labelend[bw] else { break };
            endps.push(le ^ 1);
            bw = self.inblossom[self.endpoint[le]];
        }

        self.label[b] = S;
        self.labelend[b] = self.labelend[bb];
        self.dualvar[b] = 0;
        self.blossomchilds[b] = path.clone();
        self.blossomendps[b] = endps;

        for leaf in self.blossom_leaves(b) {
            if self.label[self.inblossom[leaf]] == T {
                self.queue.push(leaf);
            }
            self.inblossom[leaf] = b;
        }

        // Cheapest edge from the new blossom to every neighbouring S blossom
        let mut bestedgeto: Vec<Option<usize>> = vec![None; 2 * self.n];
        for &child in &path {
            let nblists: Vec<Vec<usize>> = match self.blossombestedges[child].take() {
                Some(list) => vec![list],
                None => self
                    .blossom_leaves(child)
                    .into_iter()
                    .map(|leaf| self.neighbend[leaf].iter().map(|p| p / 2).collect())
                    .collect(),
            };
            for nblist in nblists {
                for k in nblist {
                    let (i, j, _) = self.edges[k];
                    let j = if self.inblossom[j] == b { i } else { j };
                    let bj = self.inblossom[j];
                    if bj != b
                        && self.label[bj] == S
                        && bestedgeto[bj].is_none_or(|e| self.slack(k) < self.slack(e))
                    {
                        bestedgeto[bj] = Some(k);
                    }
                }
            }
            self.bestedge[child] = None;
        }

        let best: Vec<usize> = bestedgeto.into_iter().flatten().collect();
        self.bestedge[b] = None;
        for &k in &best {
            if self.bestedge[b].is_none_or(|e| self.slack(k) < self.slack(e)) {
                self.bestedge[b] = Some(k);
            }
        }
        self.blossombestedges[b] = Some(best);
    }

    fn expand_blossom(&mut self, b: usize, endstage: bool) {
        let children = self.blossomchilds[b].clone();
        for &s in &children {
            self.blossomparent[s] = None;
            if s < self.n {
                self.inblossom[s] = s;
            } else if endstage && self.dualvar[s] == 0 {
                self.expand_blossom(s, endstage);
            } else {
                for leaf in self.blossom_leaves(s) {
                    self.inblossom[leaf] = s;
                }
            }
        }

        if !endstage && self.label[b] == T {
            if let Some(entry_end) = self.labelend[b] {
                self.relabel_expanded(b, entry_end, &children);
            }
        }

        self.label[b] = FREE;
        self.labelend[b] = None;
        self.blossomchilds[b].clear();
        self.blossomendps[b].clear();
        self.blossombase[b] = None;
        self.blossombestedges[b] = None;
        self.bestedge[b] = None;
        self.unusedblossoms.push(b);
    }

    /// Relabel the sub-blossoms of an expanded T blossom so the alternating
    /// tree stays consistent: the even-length path from the entry child to
    /// the base becomes T/S, the rest is relabelled only if reachable.
    fn relabel_expanded(&mut self, b: usize, entry_end: usize, children: &[usize]) {
        let endps = self.blossomendps[b].clone();
        let len = children.len() as isize;
        let at = |j: isize| j.rem_euclid(len) as usize;

        let entrychild = self.inblossom[self.endpoint[entry_end ^ 1]];
        let mut j = children.iter().position(|&c| c == entrychild).unwrap_or(0) as isize;
        let (jstep, endptrick): (isize, usize) = if j & 1 == 1 {
            j -= len;
            (1, 0)
        } else {
            (-1, 1)
        };
        let trick = endptrick as isize;

        let mut p = entry_end;
        while j != 0 {
            let through = self.endpoint[p ^ 1];
            self.label[through] = FREE;
            let q = endps[at(j - trick)] ^ endptrick ^ 1;
            let other = self.endpoint[q];
            self.label[other] = FREE;
            self.assign_label(through, T, Some(p));
            self.allowedge[endps[at(j - trick)] / 2] = true;
            j += jstep;
            p = endps[at(j - trick)] ^ endptrick;
            self.allowedge[p / 2] = true;
            j += jstep;
        }

        let bv = children[at(j)];
        let through = self.endpoint[p ^ 1];
        self.label[through] = T;
        self.label[bv] = T;
        self.labelend[through] = Some(p);
        self.labelend[bv] = Some(p);
        self.bestedge[bv] = None;

        j += jstep;
        while children[at(j)] != entrychild {
            let bv = children[at(j)];
            if self.label[bv] == S {
                j += jstep;
                continue;
            }
            let reached = self
                .blossom_leaves(bv)
                .into_iter()
                .find(|&leaf| self.label[leaf] != FREE);
            if let Some(v) = reached {
                self.label[v] = FREE;
                if let Some(m) = self.blossombase[bv].and_then(|base| self.mate[base]) {
                    let partner = self.endpoint[m];
                    self.label[partner] = FREE;
                }
                let end = self.labelend[v];
                self.assign_label(v, T, end);
            }
            j += jstep;
        }
    }

    /// Swap matched and unmatched edges along the blossom path from `v` to the base
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut t = v;
        while self.blossomparent[t] != Some(b) {
            match self.blossomparent[t] {
                Some(parent) => t = parent,
                None => return,
            }
        }
        if t >= self.n {
            self.augment_blossom(t, v);
        }

        let children = self.blossomchilds[b].clone();
        let endps = self.blossomendps[b].clone();
        let len = children.len() as isize;
        let at = |j: isize| j.rem_euclid(len) as usize;

        let i = children.iter().position(|&c| c == t).unwrap_or(0);
        let mut j = i as isize;
        let (jstep, endptrick): (isize, usize) = if i & 1 == 1 {
            j -= len;
            (1, 0)
        } else {
            (-1, 1)
        };
        let trick = endptrick as isize;

        while j != 0 {
            j += jstep;
            let t = children[at(j)];
            let p = endps[at(j - trick)] ^ endptrick;
            if t >= self.n {
                self.augment_blossom(t, self.endpoint[p]);
            }
            j += jstep;
            let t = children[at(j)];
            if t >= self.n {
                self.augment_blossom(t, self.endpoint[p ^ 1]);
            }
            let (ep, eq) = (self.endpoint[p], self.endpoint[p ^ 1]);
            self.mate[ep] = Some(p ^ 1);
            self.mate[eq] = Some(p);
        }

        self.blossomchilds[b].rotate_left(i);
        self.blossomendps[b].rotate_left(i);
        self.blossombase[b] = self.blossombase[self.blossomchilds[b][0]];
    }

    /// Augment along the path through tight S-S edge `k`
    fn augment_matching(&mut self, k: usize) {
        let (v, w, _) = self.edges[k];
        for (start, start_end) in [(v, 2 * k + 1), (w, 2 * k)] {
            let mut s = start;
            let mut p = start_end;
            loop {
                let bs = self.inblossom[s];
                if bs >= self.n {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = Some(p);
                let Some(le) = self.labelend[bs] else { break };
                let t = self.endpoint[le];
                let bt = self.inblossom[t];
                let Some(lt) = self.labelend[bt] else { break };
                s = self.endpoint[lt];
                let j = self.endpoint[lt ^ 1];
                if bt >= self.n {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = Some(lt);
                p = lt ^ 1;
            }
        }
    }

    fn solve(&mut self, max_cardinality: bool) {
        let n = self.n;
        for _ in 0..n {
            self.label.fill(FREE);
            self.bestedge.fill(None);
            for b in n..2 * n {
                self.blossombestedges[b] = None;
            }
            self.allowedge.fill(false);
            self.queue.clear();

            for v in 0..n {
                if self.mate[v].is_none() && self.label[self.inblossom[v]] == FREE {
                    self.assign_label(v, S, None);
                }
            }

            let mut augmented = false;
            loop {
                while !augmented {
                    let Some(v) = self.queue.pop() else { break };
                    augmented = self.scan_vertex(v);
                }
                if augmented {
                    break;
                }

                let (delta, step) = self.next_delta(max_cardinality);
                self.apply_delta(delta);
                match step {
                    Delta::Vertex => break,
                    Delta::FreeEdge(k) => {
                        self.allowedge[k] = true;
                        let (i, j, _) = self.edges[k];
                        let i = if self.label[self.inblossom[i]] == FREE { j } else { i };
                        self.queue.push(i);
                    }
                    Delta::SEdge(k) => {
                        self.allowedge[k] = true;
                        let (i, _, _) = self.edges[k];
                        self.queue.push(i);
                    }
                    Delta::Expand(b) => self.expand_blossom(b, false),
                }
            }

            if !augmented {
                break;
            }

            for b in n..2 * n {
                if self.blossomparent[b].is_none()
                    && self.blossombase[b].is_some()
                    && self.label[b] == S
                    && self.dualvar[b] == 0
                {
                    self.expand_blossom(b, true);
                }
            }
        }
    }

    /// Grow the alternating forest from S vertex `v`. Returns true on augmentation.
    fn scan_vertex(&mut self, v: usize) -> bool {
        for idx in 0..self.neighbend[v].len() {
            let p = self.neighbend[v][idx];
            let k = p / 2;
            let w = self.endpoint[p];
            if self.inblossom[v] == self.inblossom[w] {
                continue;
            }

            let mut kslack = 0;
            if !self.allowedge[k] {
                kslack = self.slack(k);
                if kslack <= 0 {
                    self.allowedge[k] = true;
                }
            }

            let w_label = self.label[self.inblossom[w]];
            if self.allowedge[k] {
                if w_label == FREE {
                    self.assign_label(w, T, Some(p ^ 1));
                } else if w_label == S {
                    match self.scan_blossom(v, w) {
                        Some(base) => self.add_blossom(base, k),
                        None => {
                            self.augment_matching(k);
                            return true;
                        }
                    }
                } else if self.label[w] == FREE {
                    self.label[w] = T;
                    self.labelend[w] = Some(p ^ 1);
                }
            } else if w_label == S {
                let b = self.inblossom[v];
                if self.bestedge[b].is_none_or(|e| kslack < self.slack(e)) {
                    self.bestedge[b] = Some(k);
                }
            } else if self.label[w] == FREE
                && self.bestedge[w].is_none_or(|e| kslack < self.slack(e))
            {
                self.bestedge[w] = Some(k);
            }
        }
        false
    }

    fn next_delta(&self, max_cardinality: bool) -> (i64, Delta) {
        let n = self.n;
        let min_vertex_dual = self.dualvar[..n].iter().copied().min().unwrap_or(0);

        let mut best: Option<(i64, Delta)> = None;
        if !max_cardinality {
            best = Some((min_vertex_dual, Delta::Vertex));
        }

        for v in 0..n {
            if self.label[self.inblossom[v]] != FREE {
                continue;
            }
            if let Some(k) = self.bestedge[v] {
                let d = self.slack(k);
                if best.as_ref().is_none_or(|(bd, _)| d < *bd) {
                    best = Some((d, Delta::FreeEdge(k)));
                }
            }
        }

        for b in 0..2 * n {
            if self.blossomparent[b].is_some() || self.label[b] != S {
                continue;
            }
            if let Some(k) = self.bestedge[b] {
                let d = self.slack(k) / 2;
                if best.as_ref().is_none_or(|(bd, _)| d < *bd) {
                    best = Some((d, Delta::SEdge(k)));
                }
            }
        }

        for b in n..2 * n {
            if self.blossombase[b].is_some()
                && self.blossomparent[b].is_none()
                && self.label[b] == T
                && best.as_ref().is_none_or(|(bd, _)| self.dualvar[b] < *bd)
            {
                best = Some((self.dualvar[b], Delta::Expand(b)));
            }
        }

        best.unwrap_or((min_vertex_dual.max(0), Delta::Vertex))
    }

    fn apply_delta(&mut self, delta: i64) {
        let n = self.n;
        for v in 0..n {
            match self.label[self.inblossom[v]] {
                S => self.dualvar[v] -= delta,
                T => self.dualvar[v] += delta,
                _ => {}
            }
        }
        for b in n..2 * n {
            if self.blossombase[b].is_some() && self.blossomparent[b].is_none() {
                match self.label[b] {
                    S => self.dualvar[b] += delta,
                    T => self.dualvar[b] -= delta,
                    _ => {}
                }
            }
        }
    }

    fn mates(&self) -> Vec<Option<usize>> {
        self.mate
            .iter()
            .map(|m| m.map(|p| self.endpoint[p]))
            .collect()
    }
}
