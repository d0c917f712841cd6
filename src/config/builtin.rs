//! Sites known without any configuration file

use crate::config::types::{Field, FieldMap, PageLayout, SiteSchema};

const THUMBNAIL_CLASS: &str = "pi-image-thumbnail";

fn site(
    name: &str,
    language: &str,
    base_url: &str,
    listing_path: &str,
    layout: PageLayout,
    fields: &[(Field, &str)],
) -> SiteSchema {
    SiteSchema {
        name: name.to_string(),
        language: language.to_string(),
        base_url: base_url.to_string(),
        listing_url: format!("{}{}", base_url, listing_path),
        layout,
        data_source: fields
            .iter()
            .map(|(field, locator)| (*field, locator.to_string()))
            .collect::<FieldMap>(),
    }
}

pub(crate) fn builtin_sites() -> Vec<SiteSchema> {
    vec![
        site(
            "naruto",
            "en",
            "https://naruto.fandom.com",
            "/wiki/Category:Characters",
            PageLayout::Classic,
            &[
                (Field::Kanji, "kanji"),
                (Field::Romaji, "romaji"),
                (Field::Status, "status"),
                (Field::Gender, "gender"),
                (Field::Age, "age"),
                (Field::Birthday, "birthdate"),
                (Field::Height, "height"),
                (Field::Weight, "weight"),
                (Field::Affiliation, "affiliation"),
                (Field::Occupation, "occupation"),
                (Field::Relatives, "family"),
                (Field::Episode, "debut anime"),
                (Field::Manga, "debut manga"),
                (Field::VoiceActor, "voice actors"),
                (Field::Images, THUMBNAIL_CLASS),
            ],
        ),
        site(
            "naruto",
            "fr",
            "https://naruto.fandom.com/fr",
            "/wiki/Catégorie:Personnages",
            PageLayout::Classic,
            &[
                (Field::Kanji, "kanji"),
                (Field::Romaji, "romaji"),
                (Field::Status, "statut"),
                (Field::Gender, "sexe"),
                (Field::Age, "âge"),
                (Field::Affiliation, "affiliation"),
                (Field::Occupation, "occupation"),
                (Field::Images, THUMBNAIL_CLASS),
            ],
        ),
        site(
            "one-piece",
            "en",
            "https://onepiece.fandom.com",
            "/wiki/Category:Characters",
            PageLayout::Classic,
            &[
                (Field::Name, "ename"),
                (Field::Kanji, "jname"),
                (Field::Romaji, "rname"),
                (Field::Status, "status"),
                (Field::Age, "age"),
                (Field::Birthday, "birth"),
                (Field::Height, "height"),
                (Field::Affiliation, "affiliation"),
                (Field::Occupation, "occupation"),
                (Field::Episode, "first"),
                (Field::VoiceActor, "jva"),
                (Field::Images, THUMBNAIL_CLASS),
            ],
        ),
        site(
            "one-piece",
            "fr",
            "https://onepiece.fandom.com/fr",
            "/wiki/Catégorie:Personnages",
            PageLayout::Classic,
            &[
                (Field::Kanji, "jname"),
                (Field::Romaji, "rname"),
                (Field::Status, "statut"),
                (Field::Age, "âge"),
                (Field::Affiliation, "affiliation"),
                (Field::Occupation, "occupation"),
                (Field::Images, THUMBNAIL_CLASS),
            ],
        ),
        site(
            "dragon-ball",
            "en",
            "https://dragonball.fandom.com",
            "/wiki/Category:Characters",
            PageLayout::Classic,
            &[
                (Field::Species, "Race"),
                (Field::Gender, "Gender"),
                (Field::Age, "Age"),
                (Field::Birthday, "Birth Date"),
                (Field::Height, "Height"),
                (Field::Weight, "Weight"),
                (Field::Affiliation, "Allegiance"),
                (Field::Occupation, "Occupation"),
                (Field::Relatives, "FamConnect"),
                (Field::Images, THUMBNAIL_CLASS),
            ],
        ),
        site(
            "demon-slayer",
            "en",
            "https://kimetsu-no-yaiba.fandom.com",
            "/wiki/Category:Characters",
            PageLayout::Classic,
            &[
                (Field::Kanji, "kanji"),
                (Field::Romaji, "romaji"),
                (Field::Species, "race"),
                (Field::Gender, "gender"),
                (Field::Age, "age"),
                (Field::Height, "height"),
                (Field::Weight, "weight"),
                (Field::Affiliation, "affiliation"),
                (Field::Occupation, "occupation"),
                (Field::Relatives, "relatives"),
                (Field::Manga, "manga debut"),
                (Field::Episode, "anime debut"),
                (Field::Images, THUMBNAIL_CLASS),
            ],
        ),
        site(
            "attack-on-titan",
            "en",
            "https://attackontitan.fandom.com",
            "/wiki/List_of_characters",
            PageLayout::Table1,
            &[],
        ),
        site(
            "my-hero-academia",
            "en",
            "https://myheroacademia.fandom.com",
            "/wiki/List_of_Characters",
            PageLayout::Table2,
            &[],
        ),
    ]
}
