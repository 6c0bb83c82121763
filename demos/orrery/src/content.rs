/// Sidebar text shown for a picked body.

use crate::bodies::BodyTag;

pub const PLACEHOLDER: &str =
    "<h3>Object Information</h3><p>This is the information about the clicked object.</p>";

const EARTH: &str = "<h3>Earth</h3>\
<p><strong>How large is the Earth?</strong></p>\
<p>Over two thousand years ago Eratosthenes of Cyrene estimated the Earth's \
circumference with two poles. At noon on the summer solstice he compared the \
shadows cast by poles standing straight up in two cities, one due south of the \
other. On a sphere the sun's rays meet each pole at a different angle, so the \
shadows differ.</p>\
<p>The difference between the two shadow angles is the fraction of a full circle \
separating the cities: a difference of 7.2 degrees is one fiftieth of the way \
around. Multiplying the distance between the cities by fifty gives the whole \
circumference. His estimate, about 40,000 km, is remarkably close to the modern \
value of 40,007 km.</p>";

const FLAT_EARTH: &str = "<h3>Flat Earth</h3>\
<p><strong>What is wrong with this model?</strong></p>\
<p>In ancient Miletus, Thales taught that the Earth was a flat disk floating on \
water. His pupil Anaximander proposed instead that the Earth hangs unsupported in \
the void. Questioning the accepted picture is how the idea of a round Earth \
began.</p>\
<p>Click the Earth to compare the shadows of two poles on a disk and on a \
sphere.</p>";

const SUN: &str = "<h3>Sun</h3>\
<p><strong>How do we know the Sun is at the center of the solar system?</strong></p>\
<p>Watched from the Earth, everything seems to circle us, so a geocentric \
universe does not sound unreasonable. The trouble is retrograde motion: planets \
such as Venus drift one way across the sky, reverse for a while, then carry on. \
Fixed orbits around the Earth cannot explain this.</p>\
<p>Copernicus argued for a simpler model in which the planets orbit the Sun. \
Galileo's observation of the phases of Venus and the moons of Jupiter, and later \
Kepler's laws and Newton's gravitation, settled the matter.</p>\
<p>Aristarchus estimated the Sun's distance from the half-moon: when exactly half \
the Moon is lit, the Earth, Moon and Sun form a right triangle.</p>";

const MOON: &str = "<h3>Moon</h3>\
<p><strong>How far away is the Moon?</strong></p>\
<p>Two observers far apart on the Earth see the Moon against slightly different \
background stars. The size of that shift, the parallax, together with the \
distance between the observers gives the distance to the Moon. The Earth's \
curved shadow during lunar eclipses also shows the Earth is round.</p>";

const VENUS: &str = "<h3>Venus</h3>\
<p><strong>Why does Venus show phases?</strong></p>\
<p>Through his telescope Galileo saw Venus go through a full set of phases, \
like the Moon. That only happens if Venus orbits the Sun rather than the \
Earth.</p>";

/// Sidebar HTML for a body, or the placeholder for anything untagged.
pub fn sidebar_html(tag: Option<BodyTag>) -> &'static str {
    match tag {
        Some(BodyTag::Earth) => EARTH,
        Some(BodyTag::FlatEarth) => FLAT_EARTH,
        Some(BodyTag::Sun) => SUN,
        Some(BodyTag::Moon) => MOON,
        Some(BodyTag::Venus) => VENUS,
        None => PLACEHOLDER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_has_its_own_entry() {
        for tag in BodyTag::ALL {
            let html = sidebar_html(Some(tag));
            assert_ne!(html, PLACEHOLDER);
            assert!(html.starts_with("<h3>"));
        }
        assert_eq!(sidebar_html(None), PLACEHOLDER);
    }
}
