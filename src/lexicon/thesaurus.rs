//! Synonym groups for word replacement
//!
//! Words in the same group are interchangeable for their part of speech.
//! Multi-word forms use `_` between words and are rendered with spaces
//! when the scrambler reassembles the message.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ChatError, ChatResult};
use crate::types::PartOfSpeech;

pub const NOUN_GROUPS: &[&[&str]] = &[
    &["hello", "hi", "hey", "howdy", "greeting", "salutation"],
    &["world", "globe", "earth", "planet", "cosmos"],
    &["friend", "pal", "buddy", "mate", "comrade", "chum"],
    &["dog", "hound", "pooch", "mutt", "canine", "doggo"],
    &["cat", "feline", "kitty", "moggy", "tomcat"],
    &["house", "home", "dwelling", "abode", "residence", "crib"],
    &["car", "automobile", "vehicle", "motorcar", "ride"],
    &["food", "grub", "chow", "nourishment", "fare", "eats"],
    &["pizza", "pie", "flatbread", "za"],
    &["money", "cash", "dough", "funds", "bread", "moolah"],
    &["job", "work", "occupation", "gig", "employment", "line_of_work"],
    &["man", "guy", "fellow", "gentleman", "dude", "chap"],
    &["woman", "lady", "gal", "dame"],
    &["child", "kid", "youngster", "tyke", "nipper"],
    &["party", "celebration", "bash", "shindig", "get-together", "hootenanny"],
    &["problem", "issue", "trouble", "snag", "glitch", "pickle"],
    &["idea", "notion", "thought", "concept", "brainwave"],
    &["time", "moment", "while", "spell", "jiffy"],
    &["day", "daytime", "date", "twenty-four_hours"],
    &["night", "nighttime", "evening", "dark"],
    &["meeting", "gathering", "assembly", "get-together", "powwow"],
    &["computer", "machine", "pc", "calculator", "data_processor"],
    &["phone", "telephone", "handset", "mobile", "blower"],
    &["chat", "conversation", "talk", "natter", "chitchat", "confab"],
    &["message", "note", "memo", "missive", "communication"],
    &["game", "match", "contest", "bout", "round"],
    &["movie", "film", "picture", "flick", "motion_picture"],
    &["music", "tunes", "melody", "harmony", "jams"],
    &["coffee", "java", "joe", "brew", "cup_of_joe"],
    &["weekend", "days_off", "break", "downtime"],
    &["school", "academy", "institute", "schoolhouse"],
    &["teacher", "instructor", "tutor", "educator", "mentor"],
    &["bug", "defect", "glitch", "gremlin", "error"],
    &["code", "program", "software", "script"],
    &["person", "individual", "human", "soul", "mortal"],
    &["people", "folks", "humans", "populace", "crowd"],
];

pub const VERB_GROUPS: &[&[&str]] = &[
    &["go", "move", "travel", "proceed", "head", "wander"],
    &["get", "obtain", "acquire", "grab", "fetch", "procure"],
    &["make", "create", "build", "craft", "produce", "whip_up"],
    &["know", "understand", "recognize", "grasp", "comprehend"],
    &["think", "believe", "reckon", "suppose", "ponder", "muse"],
    &["see", "watch", "observe", "notice", "spot", "behold"],
    &["come", "arrive", "approach", "show_up", "turn_up"],
    &["want", "desire", "wish", "crave", "fancy", "yearn"],
    &["look", "gaze", "stare", "peer", "glance", "peek"],
    &["eat", "consume", "devour", "munch", "scarf", "wolf_down"],
    &["run", "sprint", "dash", "race", "scamper", "bolt"],
    &["walk", "stroll", "amble", "march", "saunter", "trudge"],
    &["talk", "speak", "chat", "converse", "babble", "yap"],
    &["say", "state", "declare", "utter", "proclaim", "mention"],
    &["love", "adore", "cherish", "treasure", "dig"],
    &["hate", "loathe", "detest", "despise", "abhor"],
    &["help", "assist", "aid", "support", "lend_a_hand"],
    &["work", "labor", "toil", "grind", "slog"],
    &["play", "frolic", "romp", "gambol", "mess_around"],
    &["sleep", "slumber", "doze", "nap", "snooze", "kip"],
    &["meet", "encounter", "greet", "join", "run_into"],
    &["tell", "inform", "notify", "advise", "let_know"],
    &["give", "provide", "offer", "donate", "hand_over"],
    &["take", "seize", "grab", "snatch", "carry_off"],
    &["find", "discover", "locate", "uncover", "stumble_upon"],
    &["start", "begin", "commence", "launch", "kick_off"],
    &["stop", "halt", "cease", "quit", "knock_off"],
    &["jump", "leap", "hop", "bound", "spring", "vault"],
    &["sing", "croon", "chant", "warble", "serenade"],
    &["dance", "boogie", "groove", "jig", "shimmy"],
    &["laugh", "chuckle", "giggle", "cackle", "snicker", "guffaw"],
    &["need", "require", "demand", "lack"],
    &["try", "attempt", "endeavor", "strive", "have_a_go"],
    &["call", "phone", "ring", "dial", "buzz"],
    &["feel", "sense", "experience", "perceive"],
];

pub const ADJ_GROUPS: &[&[&str]] = &[
    &["good", "fine", "great", "excellent", "swell", "splendid"],
    &["bad", "awful", "terrible", "poor", "lousy", "dreadful"],
    &["big", "large", "huge", "enormous", "giant", "massive"],
    &["small", "little", "tiny", "minute", "wee", "teeny"],
    &["happy", "glad", "cheerful", "joyful", "merry", "chipper"],
    &["sad", "unhappy", "gloomy", "blue", "glum", "downcast"],
    &["new", "fresh", "novel", "modern", "brand-new"],
    &["old", "aged", "ancient", "elderly", "vintage", "antique"],
    &["fast", "quick", "rapid", "swift", "speedy", "zippy"],
    &["slow", "sluggish", "leisurely", "unhurried", "poky"],
    &["hot", "warm", "scorching", "blazing", "toasty"],
    &["cold", "chilly", "freezing", "frosty", "icy", "nippy"],
    &["funny", "amusing", "hilarious", "comical", "witty", "droll"],
    &["smart", "clever", "intelligent", "bright", "brainy", "sharp"],
    &["pretty", "beautiful", "lovely", "attractive", "gorgeous"],
    &["ugly", "unsightly", "hideous", "homely", "grotesque"],
    &["angry", "mad", "furious", "irate", "cross", "livid"],
    &["tired", "weary", "exhausted", "sleepy", "drained", "pooped"],
    &["hungry", "starving", "famished", "ravenous", "peckish"],
    &["quiet", "silent", "hushed", "still", "soundless"],
    &["loud", "noisy", "booming", "deafening", "rowdy"],
    &["weird", "strange", "odd", "bizarre", "peculiar", "quirky"],
    &["cool", "awesome", "neat", "rad", "wicked", "groovy"],
    &["easy", "simple", "effortless", "painless", "a_piece_of_cake"],
    &["hard", "difficult", "tough", "tricky", "arduous"],
    &["nice", "pleasant", "kind", "friendly", "agreeable"],
];

pub const ADV_GROUPS: &[&[&str]] = &[
    &["very", "really", "extremely", "super", "awfully", "mighty"],
    &["quickly", "rapidly", "swiftly", "speedily", "hastily", "in_a_flash"],
    &["slowly", "leisurely", "gradually", "sluggishly", "at_a_snail's_pace"],
    &["often", "frequently", "regularly", "repeatedly", "oft"],
    &["always", "forever", "constantly", "perpetually", "invariably"],
    &["never", "not_ever", "at_no_time", "nevermore"],
    &["now", "presently", "currently", "right_away", "at_once"],
    &["soon", "shortly", "presently", "before_long", "in_a_jiffy"],
    &["maybe", "perhaps", "possibly", "perchance", "mayhap"],
    &["really", "truly", "genuinely", "honestly", "actually"],
    &["happily", "cheerfully", "gladly", "merrily", "joyfully"],
    &["sadly", "unhappily", "sorrowfully", "glumly", "mournfully"],
    &["again", "once_more", "anew", "afresh", "over_again"],
    &["almost", "nearly", "practically", "virtually", "just_about"],
    &["today", "this_day", "nowadays"],
    &["later", "afterwards", "subsequently", "down_the_road"],
    &["well", "nicely", "properly", "ably", "splendidly"],
];

/// Lexicon file layout: `{ "noun": [["a", "b"]], "verb": [...], ... }`
#[derive(Debug, Default, Deserialize)]
struct ThesaurusFile {
    #[serde(default)]
    noun: Vec<Vec<String>>,
    #[serde(default)]
    verb: Vec<Vec<String>>,
    #[serde(default)]
    adj: Vec<Vec<String>>,
    #[serde(default)]
    adv: Vec<Vec<String>>,
}

/// Indexed synonym groups per part of speech
#[derive(Debug, Default, Clone)]
pub struct Thesaurus {
    groups: Vec<Vec<String>>,
    /// (tag, lowercased word) → indices into `groups`
    index: HashMap<(PartOfSpeech, String), Vec<usize>>,
}

impl Thesaurus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Thesaurus seeded from the compiled-in groups
    pub fn builtin() -> Self {
        let mut thesaurus = Self::new();
        for (tag, groups) in [
            (PartOfSpeech::Noun, NOUN_GROUPS),
            (PartOfSpeech::Verb, VERB_GROUPS),
            (PartOfSpeech::Adj, ADJ_GROUPS),
            (PartOfSpeech::Adv, ADV_GROUPS),
        ] {
            for group in groups {
                thesaurus.add_group(tag, group.iter().map(|w| w.to_string()).collect());
            }
        }
        thesaurus
    }

    /// Load groups from a JSON lexicon file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ChatResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let file: ThesaurusFile = serde_json::from_str(&content)?;

        let mut thesaurus = Self::new();
        for (tag, groups) in [
            (PartOfSpeech::Noun, file.noun),
            (PartOfSpeech::Verb, file.verb),
            (PartOfSpeech::Adj, file.adj),
            (PartOfSpeech::Adv, file.adv),
        ] {
            for group in groups {
                thesaurus.add_group(tag, group);
            }
        }

        if thesaurus.is_empty() {
            return Err(ChatError::Lexicon(format!(
                "{} contains no synonym groups",
                path.display()
            )));
        }
        Ok(thesaurus)
    }

    /// Register a group of interchangeable words for one tag
    pub fn add_group(&mut self, tag: PartOfSpeech, words: Vec<String>) {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        if words.len() < 2 {
            return;
        }

        let id = self.groups.len();
        for word in &words {
            self.index.entry((tag, word.clone())).or_default().push(id);
        }
        self.groups.push(words);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// All replacements for `word` under `tag`, excluding the word itself
    pub fn candidates(&self, word: &str, tag: PartOfSpeech) -> Vec<String> {
        let lower = word.to_lowercase();
        let Some(ids) = self.index.get(&(tag, lower.clone())) else {
            return Vec::new();
        };

        let mut candidates: Vec<String> = Vec::new();
        for &id in ids {
            for candidate in &self.groups[id] {
                if *candidate != lower && !candidates.contains(candidate) {
                    candidates.push(candidate.clone());
                }
            }
        }
        candidates
    }
}
