use crate::define_id_type;

define_id_type!(i64, AnimalId);
define_id_type!(i64, CategoryId);
define_id_type!(i64, EnclosureId);
define_id_type!(i64, ZooId);
