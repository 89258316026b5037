#![forbid(unsafe_code)]

//! Site content the menu ships with.

use crate::item::MenuItemDescriptor;

/// Brand title shown in the layout header.
pub const SITE_TITLE: &str = "Podcast Cuentohasta3";

/// Navigation destinations as `(label, href)`, in menu order.
pub const DESTINATIONS: [(&str, &str); 5] = [
    ("Inicio", "/"),
    ("Episodios", "/podcasts"),
    ("Sobre Nosotros", "/about"),
    ("Contacto", "/contact"),
    ("Suscribirse", "/subscribe"),
];

/// The site's navigation entries.
#[must_use]
pub fn default_destinations() -> Vec<MenuItemDescriptor> {
    DESTINATIONS
        .iter()
        .enumerate()
        .map(|(index, (label, href))| MenuItemDescriptor::new(index, *label, *href))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_in_order() {
        let labels: Vec<_> = default_destinations()
            .into_iter()
            .map(|d| (d.index, d.label))
            .collect();
        assert_eq!(labels[0], (0, "Inicio".to_string()));
        assert_eq!(labels[4], (4, "Suscribirse".to_string()));
        assert_eq!(labels.len(), 5);
    }
}
