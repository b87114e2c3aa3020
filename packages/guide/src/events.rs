//! The provincial festival calendar.
//!
//! The calendar is a fixed list shipped with the app; no backend table
//! holds it.

use chrono::Month;

use crate::models::Event;

struct Festival {
    title: &'static str,
    location: &'static str,
    date: &'static str,
    description: &'static str,
    image_url: Option<&'static str>,
}

const FESTIVALS: &[Festival] = &[
    Festival {
        title: "Cagsawa Festival",
        location: "Daraga, Albay",
        date: "February 1-29",
        description: "The Cagsawa Festival celebrates the indomitable spirit and resilience of Albayanos, not the memory of the disaster's horrors. The month-long festival kicks off at the historic and world famous Cagsawa Ruins.",
        image_url: None,
    },
    Festival {
        title: "Magayon Festival",
        location: "Province of Albay",
        date: "May 1-31",
        description: "Albay's biggest and grandest festival, with street dancing, show bands and sport competitions. Experience merrymaking the Albayano way.",
        image_url: Some("https://www.hlimg.com/images/events/738X538/v_1529062402e.jpg"),
    },
    Festival {
        title: "Puto Festival",
        location: "Oas, Albay",
        date: "April 27 – May 8",
        description: "Oas celebrates the Puto Festival to build camaraderie among Oasnuns and honor the delicacy of the town, the puto.",
        image_url: None,
    },
    Festival {
        title: "Sarung Banggui Festival",
        location: "Sto. Domingo, Albay",
        date: "May 10-20",
        description: "Sto. Domingo is home of the immortal song of Bicol, Sarung Banggi, composed by Potenciano Gregorio. The festival coincides with the composer's birth.",
        image_url: None,
    },
    Festival {
        title: "Layag Festival",
        location: "Rapu-Rapu, Albay",
        date: "May 20-27",
        description: "Named after the layag (sail boat), depicting the people's journey of faith in Rapu-Rapu.",
        image_url: None,
    },
    Festival {
        title: "Pinangat Festival",
        location: "Camalig, Albay",
        date: "June 10-24",
        description: "Held with the town fiesta in honor of St. John the Baptist and named after the local delicacy, pinangat.",
        image_url: None,
    },
    Festival {
        title: "Pulang–Anggui Festival",
        location: "Polangui, Albay",
        date: "June 15-30",
        description: "Celebrates Red Maria (Angui), who loved the color red, and showcases local culture and traditions.",
        image_url: None,
    },
    Festival {
        title: "Tabak Festival",
        location: "Tabaco City",
        date: "June 16-25",
        description: "Showcases the artistry of Tabaqueños in making their own cutlery. The name comes from 'tabak ko!', meaning 'my sword!'.",
        image_url: None,
    },
    Festival {
        title: "Lubid Festival",
        location: "Malilipot, Albay",
        date: "July 9-18",
        description: "Celebrates abaca hemp (lubid), the region's main livelihood, with a street dance parade in colorful costumes.",
        image_url: None,
    },
    Festival {
        title: "Alinao Festival",
        location: "Malinao, Albay",
        date: "July 25-26",
        description: "A tribute to the lost Alinao trees. The name is said to come from 'malinaw', clear waters like those of Vera Falls.",
        image_url: None,
    },
    Festival {
        title: "Libon Paroy Festival",
        location: "Libon, Albay",
        date: "July 1-28",
        description: "Celebrates rice (paroy), as Libon is the rice granary of Albay. Features a street parade, a sports fest and the longest tilapia and corn grill.",
        image_url: None,
    },
    Festival {
        title: "Coron Festival",
        location: "Tiwi, Albay",
        date: "August 1-30",
        description: "Tiwi is known for coron, pottery shaped in many forms and sizes.",
        image_url: None,
    },
    Festival {
        title: "Ibalong Festival",
        location: "Legazpi City",
        date: "August 10-19",
        description: "Celebrates the heritage of Bicolanos through the Ibalong Epic and its heroes Baltog, Handyong and Bantong.",
        image_url: None,
    },
    Festival {
        title: "Guinobatan Longganisa Festival",
        location: "Guinobatan, Albay",
        date: "August 1-15",
        description: "Held during the town fiesta to celebrate the bounty of the land, highlighting Guinobatan longganisa.",
        image_url: None,
    },
    Festival {
        title: "Karagumoy Festival",
        location: "Bacacay, Albay",
        date: "August 21-31",
        description: "Celebrates pandan (karagumoy), woven into mats, hats, fans and bags, the major product of the coastal town.",
        image_url: None,
    },
    Festival {
        title: "Quipia Festival",
        location: "Jovellar, Albay",
        date: "August 21-29",
        description: "An annual festival held with the town fiesta, featuring street presentations.",
        image_url: None,
    },
    Festival {
        title: "Nito–Talahib Festival",
        location: "Manito, Albay",
        date: "October 14-23",
        description: "Honors nito-talahib, the grass woven into the history and livelihood of Manito.",
        image_url: None,
    },
    Festival {
        title: "Tinapa Festival",
        location: "Pioduran, Albay",
        date: "February 23 – March 13",
        description: "Celebrates culinary expertise with tinapa (smoked fish) and the municipality's bountiful blessings.",
        image_url: None,
    },
    Festival {
        title: "Sunflower Festival",
        location: "Ligao City",
        date: "March 20-26",
        description: "Held during the cityhood anniversary, when sunflowers bloom on Kawa Kawa Hill.",
        image_url: None,
    },
];

/// Month the festival starts in, read from the leading word of its date.
pub fn start_month(event: &Event) -> Option<Month> {
    event.date.split_whitespace().next()?.parse().ok()
}

/// Every festival, ordered by starting month. Festivals starting in the same
/// month keep their published order.
pub fn festivals() -> Vec<Event> {
    let mut events: Vec<Event> = FESTIVALS
        .iter()
        .enumerate()
        .map(|(i, f)| Event {
            id: (i + 1).to_string(),
            title: f.title.to_string(),
            location: f.location.to_string(),
            date: f.date.to_string(),
            description: f.description.to_string(),
            image_url: f.image_url.map(String::from),
        })
        .collect();
    events.sort_by_key(|e| start_month(e).map(|m| m.number_from_month()).unwrap_or(13));
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_order() {
        let events = festivals();
        assert_eq!(events.len(), 19);

        let months: Vec<u32> = events
            .iter()
            .map(|e| start_month(e).unwrap().number_from_month())
            .collect();
        assert!(months.windows(2).all(|w| w[0] <= w[1]));

        assert_eq!(events[0].title, "Cagsawa Festival");
        assert_eq!(events[1].title, "Tinapa Festival");
        assert_eq!(events.last().unwrap().title, "Nito–Talahib Festival");
    }

    #[test]
    fn test_published_names_keep_en_dashes() {
        let events = festivals();
        let find = |title: &str| events.iter().find(|e| e.title == title);
        assert!(find("Pulang–Anggui Festival").is_some());
        assert!(find("Nito–Talahib Festival").is_some());
        assert!(find("Pulang-Anggui Festival").is_none());

        let puto = find("Puto Festival").map(|e| e.date.as_str());
        assert_eq!(puto, Some("April 27 – May 8"));
        assert!(events.iter().all(|e| start_month(e).is_some()));
    }

    #[test]
    fn test_ids_are_unique() {
        let events = festivals();
        let mut ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), events.len());
    }
}
