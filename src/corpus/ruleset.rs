use super::sample::{Node, Rect, Sample};

/// Marks the element that is the right answer for a sample.
pub const LABEL_ATTRIBUTE: &str = "data-fathom-comic";

/// Standard ad banner dimensions, `(width, height)`.
pub const BANNER_SIZES: [(i64, i64); 23] = [
    (468, 60),
    (728, 90),
    (336, 280),
    (300, 250),
    (250, 250),
    (160, 600),
    (120, 600),
    (120, 240),
    (240, 400),
    (234, 60),
    (180, 150),
    (125, 125),
    (120, 90),
    (120, 60),
    (88, 31),
    (120, 30),
    (230, 33),
    (728, 210),
    (720, 300),
    (500, 350),
    (550, 480),
    (300, 600),
    (94, 15),
];

pub fn is_banner_size(rect: &Rect) -> bool {
    let (w, h) = (rect.width(), rect.height());
    if w.fract() != 0.0 || h.fract() != 0.0 {
        return false;
    }
    BANNER_SIZES.contains(&(w as i64, h as i64))
}

/// Picks the comic on a page: the largest image that isn't banner-shaped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComicRuleset {
    pub coeff_size: f64,
}

impl Default for ComicRuleset {
    fn default() -> Self {
        Self { coeff_size: 1.0 }
    }
}

impl ComicRuleset {
    /// Unspecified coefficients keep their defaults; extras are ignored.
    pub fn from_coefficients(coeffs: &[f64]) -> Self {
        Self {
            coeff_size: coeffs.first().copied().unwrap_or(1.0),
        }
    }

    pub fn score(&self, node: &Node) -> f64 {
        node.rect.pixels() * self.coeff_size
    }

    /// The first highest-scoring candidate in document order.
    pub fn classify<'a>(&self, sample: &'a Sample) -> Option<&'a Node> {
        let mut best: Option<(&Node, f64)> = None;
        for node in &sample.nodes {
            if !node.element.is_tag("img") || is_banner_size(&node.rect) {
                continue;
            }
            let score = self.score(node);
            match best {
                Some((_, s)) if score <= s => {}
                _ => best = Some((node, score)),
            }
        }
        best.map(|(node, _)| node)
    }

    pub fn is_correct(&self, sample: &Sample) -> bool {
        self.classify(sample)
            .is_some_and(|n| n.element.attribute(LABEL_ATTRIBUTE) == Some("1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::sample::Element;
    use std::collections::BTreeMap;

    fn node(tag: &str, w: f64, h: f64, label: bool) -> (Element, Rect) {
        let mut attributes = BTreeMap::new();
        if label {
            attributes.insert(LABEL_ATTRIBUTE.to_string(), "1".to_string());
        }
        (
            Element {
                tag: tag.into(),
                attributes,
            },
            Rect {
                top: 0.0,
                left: 0.0,
                bottom: h,
                right: w,
            },
        )
    }

    fn sample(nodes: Vec<(Element, Rect)>) -> Sample {
        let (e, r): (Vec<_>, Vec<_>) = nodes.into_iter().unzip();
        Sample::new("s", e, r).unwrap()
    }

    #[test]
    fn test_banner_sizes() {
        let banner = Rect {
            top: 0.0,
            left: 0.0,
            bottom: 90.0,
            right: 728.0,
        };
        let odd = Rect {
            top: 0.0,
            left: 0.0,
            bottom: 90.5,
            right: 728.0,
        };
        assert!(is_banner_size(&banner));
        assert!(!is_banner_size(&odd));
    }

    #[test]
    fn test_largest_non_banner_image_wins() {
        let s = sample(vec![
            node("div", 2000.0, 2000.0, false),
            node("img", 728.0, 90.0, false),
            node("img", 400.0, 300.0, true),
            node("img", 100.0, 100.0, false),
        ]);
        let rules = ComicRuleset::default();
        assert_eq!(rules.classify(&s).unwrap().rect.right, 400.0);
        assert!(rules.is_correct(&s));
    }

    #[test]
    fn test_ties_keep_document_order() {
        let s = sample(vec![
            node("img", 10.0, 10.0, false),
            node("img", 10.0, 10.0, true),
        ]);
        assert!(!ComicRuleset::from_coefficients(&[0.0]).is_correct(&s));
    }

    #[test]
    fn test_no_candidates_is_wrong() {
        let s = sample(vec![node("p", 10.0, 10.0, true)]);
        assert!(ComicRuleset::default().classify(&s).is_none());
        assert!(!ComicRuleset::default().is_correct(&s));
    }
}
