use crate::catalog::{CatalogItem, Priority};

fn item(
    key: &str,
    label: &str,
    priority: Priority,
    synonyms: &[&str],
    detector_hints: &[&str],
    notes: &str,
) -> CatalogItem {
    CatalogItem {
        key: key.to_string(),
        label: label.to_string(),
        priority,
        synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        detector_hints: detector_hints.iter().map(|s| s.to_string()).collect(),
        notes: Some(notes.to_string()),
    }
}

/// The first-aid kitchen catalog, in declaration order.
///
/// Declaration order matters: `categorize` returns the first entry whose
/// hints (then synonyms) occur in the label, so broad words such as `bag`
/// or `bottle` resolve to whichever entry declares them first.
pub fn first_aid_items() -> Vec<CatalogItem> {
    use Priority::{Green, Orange, Red};

    vec![
        // Green: take
        item(
            "clean_cloth",
            "Clean cloth / towel",
            Green,
            &["cloth", "towel", "dish towel", "rag", "microfiber"],
            &["towel", "cloth", "rag"],
            "Pressure bandage / wound cover (if clean).",
        ),
        item(
            "plastic_wrap",
            "Plastic wrap",
            Green,
            &["cling wrap", "saran wrap", "plastic wrap"],
            &["plastic wrap", "cling film", "wrap"],
            "Occlusive dressing for burns/wounds (do not wrap tightly on burns).",
        ),
        item(
            "zip_bag",
            "Zip bag (for cold pack)",
            Green,
            &["ziploc", "zip bag", "resealable bag", "freezer bag"],
            &["plastic bag", "zip bag", "ziploc"],
            "Ice pack with cold water/ice; general storage.",
        ),
        item(
            "rubber_gloves",
            "Rubber/Nitrile gloves",
            Green,
            &["gloves", "nitrile", "latex"],
            &["glove"],
            "Barrier protection.",
        ),
        item(
            "saline_water",
            "Clean water / saline",
            Green,
            &["water", "water bottle", "bottle of water", "saline"],
            &["bottle", "water bottle"],
            "Irrigation for wounds/eyes; hydration.",
        ),
        item(
            "canned_food",
            "Canned food",
            Green,
            &["canned", "can of beans", "can of soup", "tin food"],
            &["can", "tin"],
            "High shelf-life calories.",
        ),
        item(
            "dry_food",
            "Dry food (rice/pasta/grains)",
            Green,
            &["rice", "pasta", "noodles", "oats", "flour bag (sealed food)"],
            &["pasta", "noodles", "rice"],
            "Energy source (requires water/heat to cook).",
        ),
        item(
            "energy_snacks",
            "Bars/snacks (high-calorie)",
            Green,
            &["energy bar", "protein bar", "granola bar", "snack bar"],
            &["bar"],
            "Immediate energy.",
        ),
        item(
            "paper_towels",
            "Paper towels (clean)",
            Green,
            &["paper towel", "kitchen roll", "napkin"],
            &["paper towel", "napkin"],
            "Absorbent dressing/pressure (if clean).",
        ),
        item(
            "tape",
            "Tape (medical/athletic or clean masking)",
            Green,
            &["tape", "athletic tape", "medical tape", "masking tape"],
            &["tape"],
            "Securing dressings/splints (avoid duct tape on skin).",
        ),
        item(
            "bandage",
            "Bandages / gauze",
            Green,
            &["bandage", "bandages", "gauze", "band aid", "plaster"],
            &["bandage", "gauze"],
            "Cover and protect wounds; apply pressure to stop bleeding.",
        ),
        item(
            "trash_bag",
            "Clean trash bag",
            Green,
            &["garbage bag", "trash bag"],
            &["plastic bag"],
            "Barrier/ground cover/poncho/waterproofing.",
        ),
        item(
            "blanket",
            "Blanket",
            Green,
            &["blanket", "throw"],
            &["blanket"],
            "Prevent hypothermia/shock.",
        ),
        item(
            "backpack",
            "Backpack / bag",
            Green,
            &["backpack", "bag", "knapsack", "rucksack"],
            &["backpack", "bag"],
            "Carry supplies and organize kit.",
        ),
        item(
            "pot_pan",
            "Pot / pan (cookware)",
            Green,
            &["pot", "pan", "saucepan", "skillet"],
            &["pot", "pan"],
            "Boil water for sterilization; cook food.",
        ),
        item(
            "lighter",
            "Lighter / matches",
            Green,
            &["lighter", "matches", "matchbox"],
            &["lighter", "matchbox"],
            "Heat, sterilization (flame), signaling. Use safely.",
        ),
        item(
            "person",
            "Person (save every person)",
            Green,
            &[
                "person", "people", "human", "man", "woman", "boy", "girl", "adult", "child",
                "kid", "baby",
            ],
            &[
                "person", "people", "man", "woman", "boy", "girl", "face", "human",
            ],
            "Human life has highest priority: alert, assist, and evacuate.",
        ),
        // Sharp objects are still worth taking
        item(
            "knife",
            "Knives / sharp blades",
            Green,
            &["knife", "chef knife", "blade", "paring knife"],
            &["knife"],
            "Cutting clothing/bandage, utility, protection. Handle carefully.",
        ),
        item(
            "scissors",
            "Scissors",
            Green,
            &["scissor", "kitchen scissors", "shears"],
            &["scissors"],
            "Cut dressings/clothes precisely.",
        ),
        item(
            "can_opener",
            "Can opener",
            Green,
            &["can opener", "tin opener"],
            &["can opener"],
            "Access to canned food (calories!).",
        ),
        item(
            "fork",
            "Forks / pointed cutlery",
            Green,
            &["fork", "forks"],
            &["fork"],
            "Improvised tool; can assist with dressing manipulation.",
        ),
        item(
            "multitool",
            "Multitool (with blade)",
            Green,
            &["multitool", "leatherman", "swiss army knife"],
            &["multitool"],
            "Versatile: cutting, gripping, small fixes.",
        ),
        // Orange: take if there is room
        item(
            "elastic_band",
            "Elastic band / hair tie",
            Orange,
            &["elastic band", "rubber band", "hair tie"],
            &["rubber band"],
            "Securing bandages/splints (not as tourniquet).",
        ),
        item(
            "rigid_board",
            "Cutting board / tray (splint base)",
            Orange,
            &["cutting board", "tray", "baking sheet"],
            &["cutting board", "tray"],
            "Improvised splint/backing; pad edges.",
        ),
        item(
            "tongs_tweezers",
            "Tongs / tweezers",
            Orange,
            &["tongs", "tweezers"],
            &["tongs", "tweezer"],
            "Grasping without hands; clean before use.",
        ),
        item(
            "laptop",
            "Laptop / tablet",
            Orange,
            &["laptop", "tablet", "ipad", "computer"],
            &["laptop", "tablet"],
            "Information access; bulky but useful.",
        ),
        item(
            "radio",
            "Radio / walkie talkie",
            Orange,
            &["radio", "walkie talkie", "transmitter"],
            &["radio", "walkie talkie"],
            "Emergency communication (power-dependent).",
        ),
        item(
            "phone",
            "Phone / smartphone",
            Orange,
            &["phone", "smartphone", "cellphone", "mobile"],
            &["phone", "cell phone"],
            "Navigation/communication if power exists.",
        ),
        item(
            "battery_pack",
            "Battery / power bank",
            Orange,
            &["battery", "power bank", "portable charger"],
            &["battery", "powerbank"],
            "Portable power for devices.",
        ),
        // Red: leave behind
        item(
            "cooking_oil",
            "Cooking oil",
            Red,
            &["oil", "olive oil", "vegetable oil"],
            &["bottle", "oil bottle"],
            "Do NOT apply to burns/wounds.",
        ),
        item(
            "flour_powder",
            "Flour / powders",
            Red,
            &["flour", "cornstarch", "powder"],
            &["flour"],
            "Not for bleeding; can contaminate wounds.",
        ),
        item(
            "string_tourniquet",
            "Cords/belts as tourniquet",
            Red,
            &["belt", "cord", "string"],
            &["belt"],
            "Improvised tourniquets can cause harm if untrained.",
        ),
        item(
            "mouse",
            "Computer mouse",
            Red,
            &["mouse", "computer mouse"],
            &["mouse"],
            "No use without computer or power.",
        ),
        item(
            "keyboard",
            "Keyboard",
            Red,
            &["keyboard"],
            &["keyboard"],
            "Completely useless without power.",
        ),
        item(
            "book",
            "Books / magazines",
            Red,
            &["book", "novel", "magazine"],
            &["book"],
            "Entertainment only; dead weight.",
        ),
        item(
            "decor",
            "Decorations / ornaments",
            Red,
            &["decor", "decoration", "ornament", "vase", "painting", "frame"],
            &["decor", "ornament", "frame"],
            "No survival value.",
        ),
        item(
            "furniture",
            "Furniture / chairs / tables",
            Red,
            &["chair", "table", "sofa", "desk", "couch", "bed"],
            &["chair", "sofa", "table", "desk", "couch"],
            "Too heavy, impractical.",
        ),
        item(
            "curtains",
            "Curtains / drapes",
            Red,
            &["curtain", "drape"],
            &["curtain"],
            "Bulky, no essential use.",
        ),
        item(
            "clock",
            "Clock / wall clock",
            Red,
            &["clock", "alarm clock", "wall clock"],
            &["clock"],
            "No use beyond decoration.",
        ),
        item(
            "tv",
            "Television / monitor",
            Red,
            &["tv", "television", "monitor", "screen"],
            &["tv", "monitor"],
            "Heavy, power-dependent, useless.",
        ),
        item(
            "fan",
            "Electric fan",
            Red,
            &["fan"],
            &["fan"],
            "Power-dependent comfort only.",
        ),
        item(
            "plate",
            "Plates / dishes",
            Red,
            &["plate", "dish", "mug", "cup"],
            &["plate", "mug", "cup"],
            "Low utility; fragile.",
        ),
        item(
            "game",
            "Games / consoles / entertainment",
            Red,
            &["game", "board game", "console", "controller", "toy"],
            &["controller", "toy"],
            "Entertainment only.",
        ),
        item(
            "mirror",
            "Mirror",
            Red,
            &["mirror"],
            &["mirror"],
            "Fragile and heavy.",
        ),
        item(
            "painting",
            "Painting / wall art",
            Red,
            &["painting", "poster", "art", "frame"],
            &["painting", "poster"],
            "Decoration only.",
        ),
        item(
            "pillow",
            "Pillows / cushions",
            Red,
            &["pillow", "cushion"],
            &["pillow", "cushion"],
            "Comfort item, not essential.",
        ),
    ]
}
