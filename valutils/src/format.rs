/// Formate un temps en secondes sous la forme `"M:SS"`.
///
/// Les minutes ne sont pas bornées, les secondes sont complétées à deux
/// chiffres. Toute valeur non finie (NaN, ±∞) donne `"0:00"` : c'est ce
/// qu'affiche le lecteur tant que la durée du média n'est pas connue.
///
/// # Examples
///
/// ```
/// use valutils::format_time;
///
/// assert_eq!(format_time(65.0), "1:05");
/// assert_eq!(format_time(3.9), "0:03");
/// assert_eq!(format_time(f64::NAN), "0:00");
/// ```
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    let minutes = total / 60;
    let secs = total % 60;
    format!("{}:{:02}", minutes, secs)
}

/// Position de lecture en pourcentage `[0, 100]`.
///
/// Retourne `100 * elapsed / duration`. Une durée inconnue (zéro,
/// négative ou non finie) vaut 0 : aucune division par zéro ni NaN ne
/// doit atteindre l'affichage.
pub fn progress_percent(elapsed: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !elapsed.is_finite() {
        return 0.0;
    }
    (100.0 * elapsed / duration).clamp(0.0, 100.0)
}

/// Convertit une progression `[0, 1]` en pourcentage entier affichable.
///
/// La valeur est ramenée dans `[0, 1]` puis tronquée vers le bas : une
/// progression plafonnée à 0.999 s'affiche 99, jamais 100. Seul le
/// verrou `ready` de l'écran de chargement produit un 100.
pub fn percent_display(p01: f64) -> u8 {
    let p = if p01.is_finite() {
        p01.clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p * 100.0).floor() as u8
}
