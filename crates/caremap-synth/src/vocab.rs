//! Word pools and small random helpers for synthetic records.

use caremap_core::models::ContactInfo;
use rand::seq::index;
use rand::Rng;

pub const FEMALE_NAMES: &[&str] = &[
    "Lakshmi", "Priya", "Kavitha", "Meena", "Saranya", "Divya", "Revathi", "Anitha", "Selvi",
    "Deepa", "Malathi", "Sangeetha", "Vijaya", "Gowri", "Nandhini", "Pavithra", "Bhavani",
    "Jayanthi", "Kalpana", "Sumathi",
];

pub const MALE_NAMES: &[&str] = &[
    "Murugan", "Senthil", "Karthik", "Rajesh", "Arun", "Suresh", "Vignesh", "Prakash", "Ganesh",
    "Manikandan", "Ravi", "Saravanan", "Balaji", "Dinesh", "Kumar", "Selvam",
];

pub const SURNAMES: &[&str] = &[
    "Krishnan", "Subramani", "Natarajan", "Raman", "Palani", "Shanmugam", "Velu", "Arumugam",
    "Chinnasamy", "Perumal", "Govindan", "Muthu", "Rangasamy", "Sivakumar",
];

pub const VILLAGES: &[&str] = &[
    "Pennagaram", "Palacode", "Harur", "Karimangalam", "Nallampalli", "Morappur", "Pappireddipatti",
    "Marandahalli", "Kadathur", "Eriyur", "Bommidi", "Indur", "Papparapatti", "Perumbalai",
    "Athimutlu", "Sogathur", "Laligam", "Thoppur",
];

pub const STREETS: &[&str] = &[
    "Main Road", "Bazaar Street", "Temple Street", "Bus Stand Road", "Hospital Road",
    "Gandhi Nagar", "Station Road", "Salem Road",
];

pub const LAB_NAME_STEMS: &[&str] = &[
    "Arogya", "Sri Sakthi", "Jeeva", "LifeCare", "Sri Venkateswara", "Annai", "Kaveri", "Nalam",
    "Sugam", "Vasantham",
];

pub const LAB_NAME_SUFFIXES: &[&str] =
    &["Diagnostics", "Clinical Laboratory", "Lab", "Scan & Lab", "Health Centre"];

/// (symptom, likely diagnosis, usual prescription)
pub const CONDITIONS: &[(&str, &str, &str)] = &[
    ("Fever", "Viral fever", "Paracetamol 500mg, rest and fluids"),
    ("Persistent cough", "Upper respiratory infection", "Cough syrup, steam inhalation"),
    ("Fatigue", "Iron deficiency anaemia", "Ferrous sulphate tablets"),
    ("Headache", "Tension headache", "Paracetamol as needed"),
    ("Joint pain", "Osteoarthritis", "Diclofenac gel, physiotherapy"),
    ("Frequent urination", "Type 2 diabetes", "Metformin 500mg"),
    ("Dizziness", "Hypertension", "Amlodipine 5mg"),
    ("Abdominal pain", "Gastritis", "Pantoprazole 40mg"),
    ("Skin rash", "Fungal infection", "Clotrimazole cream"),
    ("Chills and sweating", "Malaria", "Artemisinin combination therapy"),
    ("Swelling in feet", "Pregnancy-related oedema", "Leg elevation, reduced salt"),
    ("Loss of appetite", "Malnutrition", "Nutrition supplements"),
];

pub const APPOINTMENT_PURPOSES: &[&str] = &[
    "Routine check-up",
    "Antenatal visit",
    "Follow-up consultation",
    "Immunization",
    "Blood sugar review",
    "Blood pressure review",
    "Sample collection",
    "Nutrition counselling",
];

pub const TEST_RESULTS: &[&str] =
    &["Normal", "Borderline", "Abnormal - follow up advised", "Within reference range"];

/// Pick one element of a non-empty pool
pub fn pick<R, T>(rng: &mut R, pool: &[T]) -> T
where
    R: Rng + ?Sized,
    T: Copy,
{
    pool[rng.random_range(0..pool.len())]
}

/// Random non-empty subset of `pool` with at most `max` elements, in pool order
pub fn non_empty_subset<R, T>(rng: &mut R, pool: &[T], max: usize) -> Vec<T>
where
    R: Rng + ?Sized,
    T: Copy,
{
    let upper = max.clamp(1, pool.len());
    let amount = rng.random_range(1..=upper);
    let mut picked = index::sample(rng, pool.len(), amount).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| pool[i]).collect()
}

pub fn full_name<R: Rng + ?Sized>(rng: &mut R, female: bool) -> String {
    let first = if female { pick(rng, FEMALE_NAMES) } else { pick(rng, MALE_NAMES) };
    format!("{} {}", first, pick(rng, SURNAMES))
}

/// Indian mobile number and an email derived from the person's name
pub fn contact_for<R: Rng + ?Sized>(rng: &mut R, name: &str, domain: &str) -> ContactInfo {
    let phone = format!("+91 9{:04} {:05}", rng.random_range(0..10_000), rng.random_range(0..100_000));
    let local = name.to_lowercase().replace(' ', ".");
    ContactInfo { phone, email: format!("{}{}@{}", local, rng.random_range(1..100), domain) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_subset_is_non_empty_and_bounded() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = [1, 2, 3, 4, 5, 6];
        for _ in 0..200 {
            let subset = non_empty_subset(&mut rng, &pool, 3);
            assert!(!subset.is_empty());
            assert!(subset.len() <= 3);
            assert!(subset.windows(2).all(|w| w[0] < w[1]), "no duplicates, pool order");
        }
    }

    #[test]
    fn test_subset_max_larger_than_pool() {
        let mut rng = StdRng::seed_from_u64(4);
        let subset = non_empty_subset(&mut rng, &["a"], 10);
        assert_eq!(subset, vec!["a"]);
    }

    #[test]
    fn test_contact_format() {
        let mut rng = StdRng::seed_from_u64(5);
        let contact = contact_for(&mut rng, "Priya Raman", "caremap.example");
        assert!(contact.phone.starts_with("+91 9"));
        assert!(contact.email.starts_with("priya.raman"));
        assert!(contact.email.ends_with("@caremap.example"));
    }
}
