use crate::datastructures::BitSet;
use crate::graph::{BaseGraph, BitGraph, MutableGraph};
use std::convert::TryFrom;
use std::fmt::Display;
use std::io;
use std::io::BufRead;

fn invalid<E: Display>(e: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
}

fn two_numbers<'a, I: Iterator<Item = &'a str>>(mut it: I) -> Result<(usize, usize), io::Error> {
    let mut next = || {
        it.next()
            .ok_or_else(|| invalid("Invalid line"))?
            .parse::<usize>()
            .map_err(invalid)
    };
    let a = next()?;
    let b = next()?;
    Ok((a, b))
}

/// `p edge <n> <m>`, the format token is not checked.
pub fn dimacs_p(line: &str) -> Result<(usize, usize), io::Error> {
    two_numbers(line.trim_start_matches('p').split_whitespace().skip(1))
}

/// `e <u> <v>` with 1-based ids, returned 0-based.
pub fn dimacs_e(line: &str) -> Result<(usize, usize), io::Error> {
    let (u, v) = two_numbers(line.trim_start_matches('e').split_whitespace())?;
    if u == 0 || v == 0 {
        return Err(invalid("vertex ids start at 1"));
    }
    Ok((u - 1, v - 1))
}

/// Reader for DIMACS style graph files such as the `.dgf` files of
/// TreewidthLIB: comment lines start with `c`, one `p` line declares the
/// vertex and edge counts, and every `e` line holds an edge. Loops and
/// repeated edges are skipped.
pub struct DimacsRead<T: BufRead>(pub T);

impl<T: BufRead> TryFrom<DimacsRead<T>> for BitGraph {
    type Error = io::Error;

    fn try_from(reader: DimacsRead<T>) -> Result<Self, Self::Error> {
        let reader = reader.0;
        let mut graph: Option<BitGraph> = None;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            match line.chars().next() {
                None | Some('c') => {}
                Some('p') => {
                    if graph.is_some() {
                        return Err(invalid("More than one p line"));
                    }
                    let (n, _) = dimacs_p(line)?;
                    graph = Some(BitGraph::with_vertices(BitSet::full(n).map_err(invalid)?));
                }
                _ => {
                    let graph = graph.as_mut().ok_or_else(|| invalid("Edge before p line"))?;
                    let (u, v) = dimacs_e(line)?;
                    if !graph.has_vertex(u) || !graph.has_vertex(v) {
                        return Err(invalid(format!("Edge {} {} out of range", u + 1, v + 1)));
                    }
                    if u != v && !graph.has_edge(u, v) {
                        graph
                            .connect(BitSet::singleton(u), BitSet::singleton(v))
                            .map_err(invalid)?;
                    }
                }
            };
        }
        graph.ok_or_else(|| invalid("Missing p line"))
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{BaseGraph, BitGraph};
    use crate::io::{dimacs_e, dimacs_p, DimacsRead};
    use std::convert::TryFrom;
    use std::io::{BufReader, ErrorKind};

    fn read(text: &str) -> std::io::Result<BitGraph> {
        BitGraph::try_from(DimacsRead(BufReader::new(text.as_bytes())))
    }

    #[test]
    fn lines() {
        assert_eq!(dimacs_p("p edge 5 7").unwrap(), (5, 7));
        assert_eq!(dimacs_p("p tw 3  2").unwrap(), (3, 2));
        assert_eq!(dimacs_e("e 1 4").unwrap(), (0, 3));
        assert!(dimacs_e("e 0 4").is_err());
        assert!(dimacs_e("e 1").is_err());
        assert!(dimacs_p("p edge x 3").is_err());
    }

    #[test]
    fn petersen_like() {
        let graph = read(
            "c five cycle with a chord\n\
             p edge 5 6\n\
             e 1 2\n\
             e 2 3\n\
             e 3 4\n\
             e 4 5\n\
             e 5 1\n\
             e 1 3\n\
             e 3 1\n\
             e 2 2\n",
        )
        .unwrap();
        assert_eq!(graph.order(), 5);
        assert_eq!(graph.edge_count(), 6);
        assert!(graph.has_edge(0, 2));
        assert!(!graph.has_edge(1, 1));
    }

    #[test]
    fn malformed() {
        assert_eq!(
            read("e 1 2\n").map(|_| ()).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert!(read("c nothing\n").is_err());
        assert!(read("p edge 3 1\ne 1 4\n").is_err());
        assert!(read("p edge 200 0\n").is_err());
        assert!(read("p edge 2 0\np edge 2 0\n").is_err());
    }
}
