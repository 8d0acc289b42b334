mod participant;
