//! Sample pets used when no readable pet file exists.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::{Pet, PetId};

/// (name, species, breed, age, notes, background colour)
const SAMPLES: [(&str, &str, &str, u8, &str, &str); 6] = [
    (
        "Max",
        "Dog",
        "Golden Retriever",
        3,
        "Friendly and energetic, loves to play fetch. Great with kids!",
        "#866620",
    ),
    (
        "Luna",
        "Cat",
        "Siamese",
        2,
        "Playful and affectionate. Loves attention and interactive toys.",
        "#563335",
    ),
    (
        "Charlie",
        "Dog",
        "Labrador Mix",
        5,
        "Calm and gentle companion. Perfect for families looking for a loyal friend.",
        "#866620",
    ),
    (
        "Whiskers",
        "Cat",
        "Tabby",
        1,
        "Young and curious kitten. Still learning about the world around her.",
        "#FFC333",
    ),
    (
        "Buddy",
        "Dog",
        "Beagle",
        4,
        "Sweet-natured and food-motivated. Great for training and outdoor adventures.",
        "#6B4523",
    ),
    (
        "Mittens",
        "Cat",
        "Persian",
        3,
        "Elegant and serene. Prefers a quiet environment with lots of petting.",
        "#F5F5DC",
    ),
];

/// Returns the fixed seed catalog. Ids run from 1 and the first pet is
/// the pet of the week.
#[must_use]
pub fn sample_pets() -> Vec<Pet> {
    SAMPLES
        .iter()
        .zip(1u32..)
        .map(|(&(name, species, breed, age, notes, colour), id)| Pet {
            id: PetId::new(id),
            name: name.to_string(),
            species: species.to_string(),
            breed: Some(breed.to_string()),
            age,
            notes: Some(notes.to_string()),
            image_path: Some(placeholder_image(&format!("{name} - {breed}"), colour)),
            is_adopted: false,
            is_pet_of_the_week: id == 1,
        })
        .collect()
}

/// Renders a 400x300 SVG card with a caption and returns it as a data URI.
fn placeholder_image(caption: &str, colour: &str) -> String {
    let svg = format!(
        "<svg width=\"400\" height=\"300\" xmlns=\"http://www.w3.org/2000/svg\">\
         <rect width=\"400\" height=\"300\" fill=\"{colour}\"/>\
         <circle cx=\"200\" cy=\"120\" r=\"60\" fill=\"#FFFFFF\" fill-opacity=\"0.35\"/>\
         <text x=\"200\" y=\"260\" font-size=\"22\" text-anchor=\"middle\" fill=\"#333\">{caption}</text>\
         </svg>"
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_sequential_ids_and_one_featured_pet() {
        let pets = sample_pets();
        assert_eq!(pets.len(), 6);
        let ids: Vec<u32> = pets.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(pets.iter().filter(|p| p.is_pet_of_the_week).count(), 1);
        assert!(pets.iter().all(Pet::is_available));
    }

    #[test]
    fn seed_images_are_inline() {
        for pet in sample_pets() {
            assert!(pet.local_image_path().is_none());
            let image = pet.image_path.unwrap_or_default();
            assert!(image.starts_with("data:image/svg+xml;base64,"));
        }
    }
}
